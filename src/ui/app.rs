use std::cell::RefCell;
use std::rc::Rc;

use iced::{
    Alignment, Element, Length, Size, Subscription, Task,
    widget::{Column, Container, Image, Row, Space, button, image, text},
    window,
};

use crate::coffee::{
    CoffeeController, Controller, ControllerError, Disposable, ImageSize, MarkupConfig,
    SkeletonController,
    markup::{BUTTON_ROW_CLASS, build_coffee_page},
};
use crate::dom::{Document, NodeId};

pub const WINDOW_SIZE: Size = Size::new(420.0, 560.0);

//cup bitmap is square
const CUP_PIXELS: u32 = 48;

/// Which controller drives the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Solution,
    /// Exercise starting point: nothing is wired up.
    Start,
}

impl Variant {
    pub fn title(self) -> &'static str {
        match self {
            Variant::Solution => "Coffee Counter",
            Variant::Start => "Coffee Counter (start)",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Message {
    Click(NodeId),
    CloseRequested(window::Id),
}

pub struct CoffeeApp {
    document: Rc<RefCell<Document>>,
    controller: Box<dyn Controller>,
    config: MarkupConfig,
    cup: image::Handle,
}

impl CoffeeApp {
    /// Builds the page and mounts the chosen controller on it.
    pub fn boot(variant: Variant) -> Result<Self, ControllerError> {
        let config = MarkupConfig::default();
        let mut doc = Document::new();
        let container = build_coffee_page(&mut doc, &config)?;
        let document = Rc::new(RefCell::new(doc));

        let controller: Box<dyn Controller> = match variant {
            Variant::Solution => Box::new(CoffeeController::with_config(
                Rc::clone(&document),
                container,
                config.clone(),
            )?),
            Variant::Start => Box::new(SkeletonController::new(Rc::clone(&document), container)?),
        };
        log::info!("{} ready", variant.title());

        Ok(Self {
            document,
            controller,
            config,
            cup: cup_handle(),
        })
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    pub fn controller(&self) -> &dyn Controller {
        self.controller.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Click(node) => {
                let events = self.document.borrow().click(node);
                if events.is_empty() {
                    log::debug!("click on {node:?} reached no listener");
                }
                for event in &events {
                    if let Err(err) = self.controller.handle_event(event) {
                        log::error!("failed to handle click on {node:?}: {err}");
                    }
                }
                Task::none()
            }
            Message::CloseRequested(id) => {
                self.controller.dispose();
                window::close(id)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let doc = self.document.borrow();
        let mut page = Column::new()
            .spacing(20)
            .align_x(Alignment::Center)
            .width(Length::Fill);

        if doc.has_class(doc.body(), &self.config.no_cups_class) {
            page = page.push(text("No cups yet").size(14));
        }
        page = page.push(self.node_view(&doc, self.controller.container()));

        Container::new(page)
            .padding(20)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::close_requests().map(Message::CloseRequested)
    }

    fn node_view<'a>(&self, doc: &Document, node: NodeId) -> Element<'a, Message> {
        let Ok(element) = doc.element(node) else {
            return Space::new(Length::Shrink, Length::Shrink).into();
        };

        if element.tag().eq_ignore_ascii_case(&self.config.image_tag) {
            let size = ImageSize::from_classes(element.classes());
            return Image::<image::Handle>::new(self.cup.clone())
                .width(display_width(size))
                .into();
        }
        if element.has_class(&self.config.button_class) {
            return button(text(element.text().to_owned()))
                .padding(10)
                .on_press(Message::Click(node))
                .into();
        }
        if element.tag() == "h1" {
            return text(element.text().to_owned()).size(28).into();
        }
        if element.children().is_empty() {
            return text(element.text().to_owned()).into();
        }

        let children = element.children().iter().map(|c| self.node_view(doc, *c));
        if element.has_class(BUTTON_ROW_CLASS) {
            Row::with_children(children).spacing(10).into()
        } else {
            Column::with_children(children)
                .spacing(16)
                .align_x(Alignment::Center)
                .into()
        }
    }
}

fn display_width(size: ImageSize) -> f32 {
    match size {
        ImageSize::None => 96.0,
        ImageSize::Two => 128.0,
        ImageSize::Three => 160.0,
        ImageSize::Four => 192.0,
        ImageSize::Many => 224.0,
    }
}

/// A small mug drawn straight into an RGBA buffer.
fn cup_handle() -> image::Handle {
    let n = CUP_PIXELS;
    let mut pixels = Vec::with_capacity((n * n * 4) as usize);
    for y in 0..n {
        for x in 0..n {
            let in_cup = (8..34).contains(&x) && (14..42).contains(&y);
            let in_coffee = in_cup && y < 20;
            let in_handle = (34..42).contains(&x)
                && (20..34).contains(&y)
                && !((34..39).contains(&x) && (23..31).contains(&y));
            let rgba: [u8; 4] = if in_coffee {
                [0x4b, 0x2e, 0x1e, 0xff]
            } else if in_cup || in_handle {
                [0xf5, 0xf0, 0xe8, 0xff]
            } else {
                [0, 0, 0, 0]
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    image::Handle::from_rgba(n, n, pixels)
}

pub fn run(variant: Variant, app: CoffeeApp) -> iced::Result {
    iced::application(variant.title(), CoffeeApp::update, CoffeeApp::view)
        .subscription(CoffeeApp::subscription)
        .exit_on_close_request(false)
        .window_size(WINDOW_SIZE)
        .run_with(move || (app, Task::none()))
}
