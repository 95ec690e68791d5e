//! Browser front end: binds the page's elements to a [`Controller`] and
//! redraws them from the view state.
//!
//! The page must contain elements with the ids `register_number`,
//! `course_title`, `message`, `loading`, `student_info`, `relevant_courses`
//! and `suggestions`. Backend-provided text is always written with
//! `textContent`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

use super::controller::Controller;
use crate::client::WasmClient;
use crate::config::Config;
use crate::error::{ErrorKind, Result};
use crate::interface::HttpClient;
use crate::view::{student_lines, StudentPanel, ViewSink, ViewState};

fn dom_err(err: impl std::fmt::Debug) -> ErrorKind {
    ErrorKind::DomError(format!("{:?}", err))
}

#[derive(Clone)]
struct Elements {
    document: Document,
    register_number: HtmlInputElement,
    course_title: HtmlInputElement,
    message: HtmlElement,
    loading: HtmlElement,
    student_info: HtmlElement,
    relevant_courses: HtmlElement,
    suggestions: HtmlElement,
}

impl Elements {
    fn from_document(document: Document) -> Result<Self> {
        Ok(Self {
            register_number: by_id(&document, "register_number")?,
            course_title: by_id(&document, "course_title")?,
            message: by_id(&document, "message")?,
            loading: by_id(&document, "loading")?,
            student_info: by_id(&document, "student_info")?,
            relevant_courses: by_id(&document, "relevant_courses")?,
            suggestions: by_id(&document, "suggestions")?,
            document,
        })
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| ErrorKind::DomError(format!("missing element #{id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| ErrorKind::DomError(format!("#{id} has an unexpected element type")).into())
}

pub struct DomView {
    elements: Elements,
}

impl DomView {
    pub fn from_document() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ErrorKind::DomError("no document".to_string()))?;
        Ok(Self {
            elements: Elements::from_document(document)?,
        })
    }

    fn draw(&self, state: &ViewState) -> Result<()> {
        let el = &self.elements;

        sync_value(&el.register_number, &state.register_number);
        sync_value(&el.course_title, &state.course_title);

        let classes = el.register_number.class_list();
        classes.remove_2("valid", "invalid").map_err(dom_err)?;
        if let Some(class) = state.register_field.class() {
            classes.add_1(class).map_err(dom_err)?;
        }

        set_display(&el.loading, state.loading)?;

        el.message.set_text_content(None);
        if let Some(message) = &state.message {
            if let Some(label) = message.label {
                let strong = self.create("strong")?;
                strong.set_text_content(Some(label));
                el.message.append_child(&strong).map_err(dom_err)?;
                el.message
                    .append_with_str_1(&format!(" {}", message.text))
                    .map_err(dom_err)?;
            } else {
                el.message.set_text_content(Some(&message.text));
            }
            set_color(&el.message, message.tone.color())?;
        }

        self.draw_student_panel(&state.student_panel)?;
        self.draw_relevant_courses(state)?;

        el.suggestions.set_text_content(None);
        for (index, suggestion) in state.suggestions.items().iter().enumerate() {
            let item = self.create("li")?;
            item.set_text_content(Some(suggestion));
            item.set_attribute("data-index", &index.to_string())
                .map_err(dom_err)?;
            el.suggestions.append_child(&item).map_err(dom_err)?;
        }
        Ok(())
    }

    fn draw_student_panel(&self, panel: &StudentPanel) -> Result<()> {
        let container = &self.elements.student_info;
        container.set_text_content(None);

        match panel {
            StudentPanel::Hidden => return set_display(container, false),
            StudentPanel::Info(info) => {
                for (label, value) in student_lines(info) {
                    let line = self.create("p")?;
                    let strong = self.create("strong")?;
                    strong.set_text_content(Some(label));
                    line.append_child(&strong).map_err(dom_err)?;
                    line.append_with_str_1(&format!(" {value}"))
                        .map_err(dom_err)?;
                    container.append_child(&line).map_err(dom_err)?;
                }
            }
            StudentPanel::Rejected(message) => {
                let line = self.create("p")?;
                line.set_text_content(Some(message));
                line.set_attribute("style", "color: red").map_err(dom_err)?;
                container.append_child(&line).map_err(dom_err)?;
            }
        }
        set_display(container, true)
    }

    fn draw_relevant_courses(&self, state: &ViewState) -> Result<()> {
        let container = &self.elements.relevant_courses;
        container.set_text_content(None);

        let Some(relevant) = &state.relevant_courses else {
            return set_display(container, false);
        };

        let message = self.create("p")?;
        let strong = self.create("strong")?;
        strong.set_text_content(Some(&relevant.message));
        message.append_child(&strong).map_err(dom_err)?;
        container.append_child(&message).map_err(dom_err)?;

        let list = self.create("ul")?;
        for course in &relevant.courses {
            let item = self.create("li")?;
            item.set_text_content(Some(course));
            list.append_child(&item).map_err(dom_err)?;
        }
        container.append_child(&list).map_err(dom_err)?;

        set_color(container, "orange")?;
        set_display(container, true)
    }

    fn create(&self, tag: &str) -> Result<Element> {
        Ok(self.elements.document.create_element(tag).map_err(dom_err)?)
    }
}

impl ViewSink for DomView {
    fn render(&self, state: &ViewState) {
        if let Err(e) = self.draw(state) {
            log::error!("failed to draw view: {e}");
        }
    }
}

// Programmatic writes would move the caret, so only write on a real change.
fn sync_value(input: &HtmlInputElement, value: &str) {
    if input.value() != value {
        input.set_value(value);
    }
}

fn set_display(element: &HtmlElement, visible: bool) -> Result<()> {
    let display = if visible { "block" } else { "none" };
    element
        .style()
        .set_property("display", display)
        .map_err(dom_err)?;
    Ok(())
}

fn set_color(element: &HtmlElement, color: &str) -> Result<()> {
    element
        .style()
        .set_property("color", color)
        .map_err(dom_err)?;
    Ok(())
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    // listeners live as long as the page
    closure.forget();
    Ok(())
}

/// Find the page elements, create the client and wire the input events.
pub async fn mount(config: Config) -> Result<Controller<WasmClient>> {
    let view = DomView::from_document()?;
    let elements = view.elements.clone();
    let client = WasmClient::new(&config).await?;
    let controller = Controller::new(client, config, view);

    let (ctl, input) = (controller.clone(), elements.register_number.clone());
    listen(&elements.register_number, "input", move |_| {
        ctl.on_register_input(&input.value())
    })?;

    let ctl = controller.clone();
    listen(&elements.register_number, "keydown", move |_| {
        ctl.on_register_keydown()
    })?;

    let (ctl, input) = (controller.clone(), elements.course_title.clone());
    listen(&elements.course_title, "input", move |_| {
        ctl.on_course_title_input(&input.value())
    })?;

    let ctl = controller.clone();
    listen(&elements.course_title, "keydown", move |event| {
        let is_enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Enter");
        if is_enter {
            event.prevent_default();
            ctl.on_course_title_enter();
        }
    })?;

    let ctl = controller.clone();
    listen(&elements.suggestions, "click", move |event| {
        let index = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest("li").ok().flatten())
            .and_then(|item| item.get_attribute("data-index"))
            .and_then(|index| index.parse::<usize>().ok());
        if let Some(index) = index {
            ctl.on_suggestion_click(index);
        }
    })?;

    log::info!("mounted against {}", controller.config().api_base);
    Ok(controller)
}

#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = mount(Config::from_env()).await {
            log::error!("failed to start: {e}");
        }
    });
}
