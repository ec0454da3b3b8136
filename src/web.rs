//! Browser binding.
//!
//! Exports `Scroller` to JavaScript: `new Scroller(el, options)` and
//! `resize()`. The container gets a non-passive `wheel` listener, the track a
//! `mousedown` listener, and `mousemove`/`mouseup` are attached to `window`
//! only for the duration of a drag.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use scroller_core::constants::PRIMARY_BUTTON;
use scroller_core::{
    DeltaMode, ElementRef, Hit, Host, Release, Result, ScrollError, ScrollOptions, ScrollRegion,
    StyleProperty, px, wheel_delta_px,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, HtmlElement, MouseEvent, Node, WheelEvent, Window};

type SharedRegion = Rc<RefCell<ScrollRegion<WebDom>>>;
type WeakRegion = Weak<RefCell<ScrollRegion<WebDom>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"scroller: a logger was already installed".into());
    }
}

fn dom_error(err: JsValue) -> ScrollError {
    ScrollError::dom(format!("{:?}", err))
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        log::error!("scroller: {}", e);
    }
}

// =============================================================================
// Host
// =============================================================================

/// [`Host`] backed by the live document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ScrollError::dom("no document available"))?;
        Ok(Self { document })
    }
}

impl Host for WebDom {
    type Node = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn query_selector(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into()
            .ok()
    }

    fn query_class(&self, root: &HtmlElement, class: &str) -> Option<HtmlElement> {
        root.query_selector(&format!(".{}", class))
            .ok()
            .flatten()?
            .dyn_into()
            .ok()
    }

    fn create_element(&self, class: &str) -> Result<HtmlElement> {
        let element: HtmlElement = self
            .document
            .create_element("div")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| ScrollError::dom("created element is not an HtmlElement"))?;
        element.set_class_name(class);
        Ok(element)
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn offset_height(&self, node: &HtmlElement) -> f64 {
        f64::from(node.offset_height())
    }

    fn set_style_px(&self, node: &HtmlElement, property: StyleProperty, value: f64) -> Result<()> {
        node.style()
            .set_property(property.css_name(), &px(value))
            .map_err(dom_error)
    }
}

// =============================================================================
// Global drag listeners
// =============================================================================

/// Window-level move/up handlers, built once and attached per drag.
struct DragListeners {
    window: Window,
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_up: Closure<dyn FnMut(MouseEvent)>,
}

impl DragListeners {
    fn new(window: Window, region: WeakRegion) -> Self {
        let move_region = region.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(region) = move_region.upgrade() else {
                return;
            };
            report(region.borrow_mut().pointer_move(f64::from(event.client_y())));
        }) as Box<dyn FnMut(MouseEvent)>);

        let on_up = Closure::wrap(Box::new(move |_event: MouseEvent| {
            if let Some(region) = region.upgrade() {
                region.borrow_mut().pointer_up();
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        Self {
            window,
            on_move,
            on_up,
        }
    }

    /// Attach both handlers; the returned guard detaches them.
    fn attach(listeners: &Rc<Self>) -> Result<Release> {
        for (kind, callback) in listeners.callbacks() {
            if let Err(err) = listeners
                .window
                .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            {
                listeners.detach();
                return Err(dom_error(err));
            }
        }
        let held = Rc::clone(listeners);
        Ok(Release::new(move || held.detach()))
    }

    fn detach(&self) {
        for (kind, callback) in self.callbacks() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            {
                log::warn!("scroller: failed to remove {} listener: {:?}", kind, err);
            }
        }
    }

    fn callbacks(&self) -> [(&'static str, &Closure<dyn FnMut(MouseEvent)>); 2] {
        [("mousemove", &self.on_move), ("mouseup", &self.on_up)]
    }
}

// =============================================================================
// Element handlers
// =============================================================================

fn wheel_handler(region: WeakRegion) -> Closure<dyn FnMut(WheelEvent)> {
    Closure::wrap(Box::new(move |event: WheelEvent| {
        let Some(region) = region.upgrade() else {
            return;
        };
        event.prevent_default();
        let mut region = region.borrow_mut();
        let page = region.geometry().container_height;
        let delta = wheel_delta_px(event.delta_y(), DeltaMode::from_dom(event.delta_mode()), page);
        // deltaY grows downwards while content offsets grow upwards
        report(region.wheel(-delta));
    }) as Box<dyn FnMut(WheelEvent)>)
}

fn press_handler(region: WeakRegion, drag: Rc<DragListeners>) -> Closure<dyn FnMut(MouseEvent)> {
    Closure::wrap(Box::new(move |event: MouseEvent| {
        if event.button() != PRIMARY_BUTTON {
            return;
        }
        let Some(region) = region.upgrade() else {
            return;
        };
        event.prevent_default();
        let hit = hit_test(&region.borrow(), &event);
        let pointer_y = f64::from(event.client_y());
        // Any previous drag is ended before `attach` runs, so its detach
        // cannot strip the listeners this press registers.
        report(
            region
                .borrow_mut()
                .pointer_down(hit, pointer_y, || DragListeners::attach(&drag)),
        );
    }) as Box<dyn FnMut(MouseEvent)>)
}

fn hit_test(region: &ScrollRegion<WebDom>, event: &MouseEvent) -> Hit {
    let parts = region.parts();
    let on_thumb = event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .is_some_and(|node| parts.thumb.contains(Some(&node)));
    if on_thumb {
        Hit::Thumb
    } else {
        let top = parts.track.get_bounding_client_rect().top();
        Hit::Track {
            offset_y: f64::from(event.client_y()) - top,
        }
    }
}

fn element_ref(el: JsValue) -> Result<ElementRef<HtmlElement>> {
    if let Some(selector) = el.as_string() {
        return Ok(ElementRef::Selector(selector));
    }
    el.dyn_into::<HtmlElement>()
        .map(ElementRef::Element)
        .map_err(|value| ScrollError::InvalidSelector(format!("{:?}", value)))
}

fn parse_options(options: &JsValue) -> Result<ScrollOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(ScrollOptions::default());
    }
    let json = js_sys::JSON::stringify(options)
        .map_err(|err| ScrollError::invalid_option(format!("{:?}", err)))?
        .as_string()
        .ok_or_else(|| ScrollError::invalid_option("options must be a plain object"))?;
    ScrollOptions::from_json(&json)
}

// =============================================================================
// Exported widget
// =============================================================================

/// Custom scrollbar attached to a container element.
#[wasm_bindgen]
pub struct Scroller {
    region: SharedRegion,
    on_wheel: Closure<dyn FnMut(WheelEvent)>,
    on_press: Closure<dyn FnMut(MouseEvent)>,
    _drag: Rc<DragListeners>,
}

#[wasm_bindgen]
impl Scroller {
    /// Build a scroller on `el`, an element or an `#id` / `.class` selector.
    #[wasm_bindgen(constructor)]
    pub fn new(el: JsValue, options: JsValue) -> std::result::Result<Scroller, JsError> {
        let target = element_ref(el)?;
        let options = parse_options(&options)?;
        let window = web_sys::window().ok_or_else(|| ScrollError::dom("no window available"))?;

        let region = Rc::new(RefCell::new(ScrollRegion::new(WebDom::new()?, target, options)?));
        let drag = Rc::new(DragListeners::new(window, Rc::downgrade(&region)));
        let on_wheel = wheel_handler(Rc::downgrade(&region));
        let on_press = press_handler(Rc::downgrade(&region), Rc::clone(&drag));

        let scroller = Scroller {
            region,
            on_wheel,
            on_press,
            _drag: drag,
        };
        scroller.bind()?;
        log::info!("scroller attached");
        Ok(scroller)
    }

    /// Re-measure after the container, track or content changed size.
    pub fn resize(&self) -> std::result::Result<(), JsError> {
        self.region.borrow_mut().resize()?;
        Ok(())
    }
}

impl Scroller {
    fn bind(&self) -> Result<()> {
        let region = self.region.borrow();
        let parts = region.parts();

        // Must not be passive, or preventDefault cannot stop the page scrolling.
        let wheel_options = AddEventListenerOptions::new();
        wheel_options.set_passive(false);
        parts
            .container
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                self.on_wheel.as_ref().unchecked_ref(),
                &wheel_options,
            )
            .map_err(dom_error)?;
        parts
            .track
            .add_event_listener_with_callback("mousedown", self.on_press.as_ref().unchecked_ref())
            .map_err(dom_error)
    }
}

impl Drop for Scroller {
    fn drop(&mut self) {
        let Ok(region) = self.region.try_borrow() else {
            return;
        };
        let parts = region.parts();
        let removals = [
            (
                "wheel",
                parts
                    .container
                    .remove_event_listener_with_callback("wheel", self.on_wheel.as_ref().unchecked_ref()),
            ),
            (
                "mousedown",
                parts
                    .track
                    .remove_event_listener_with_callback("mousedown", self.on_press.as_ref().unchecked_ref()),
            ),
        ];
        for (kind, result) in removals {
            if let Err(err) = result {
                log::warn!("scroller: failed to remove {} listener: {:?}", kind, err);
            }
        }
        log::debug!("scroller detached");
    }
}
