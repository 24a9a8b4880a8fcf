//! Browser implementations of the core's host traits.
//!
//! Scene-side effects (part visibility, materials, animator triggers) go to
//! the page's `configuratorScene` JS object that owns the WebGL scene; windows,
//! widgets, audio and navigation are plain DOM.

use crate::constants::{CLASS_PULSE, CLASS_SELECTED, INFO_LAYER_ID, LOADING_ID, WIDGET_BAR_ID};
use crate::dom;
use crate::input;
use configurator_core::{
    AccessoryVariant, AnimationHost, AttachmentToggle, AudioHost, HighlightHost, Hosts,
    InfoWindowSpec, NavigationHost, OrbitCamera, UiHost, VisibilityHost, Widget, WindowHandle,
    WindowHost,
};
use fnv::FnvHashMap;
use glam::{Vec2, Vec3, Vec4};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = setPartVisible)]
    fn scene_set_part_visible(part: &str, visible: bool) -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = setPartOpacity)]
    fn scene_set_part_opacity(part: &str, opacity: f32) -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = setPartLocalPosition)]
    fn scene_set_part_local_position(part: &str, x: f32, y: f32, z: f32) -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = setMaterialColor)]
    fn scene_set_material_color(renderer: &str, r: f32, g: f32, b: f32, a: f32)
        -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = getMaterialColor)]
    fn scene_material_color(renderer: &str) -> Result<JsValue, JsValue>;
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = triggerAnimation)]
    fn scene_trigger_animation(animator: &str, trigger: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = configuratorScene, js_name = setCamera)]
    fn scene_set_camera(eye: &[f32], target: &[f32], fovy: f32) -> Result<(), JsValue>;
}

fn report(what: &str, id: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("[scene] {} {} failed: {:?}", what, id, e);
    }
}

/// Hand the orbit camera to the page's renderer.
pub fn push_camera(camera: &OrbitCamera) {
    let eye = camera.eye().to_array();
    let target = camera.target.to_array();
    // called every frame; keep failures out of the error log
    if let Err(e) = scene_set_camera(&eye, &target, camera.fovy_radians) {
        log::debug!("[scene] setCamera failed: {:?}", e);
    }
}

pub struct WebSceneHost;

impl VisibilityHost for WebSceneHost {
    fn set_part_visible(&self, part: &str, visible: bool) {
        report("setPartVisible", part, scene_set_part_visible(part, visible));
    }
    fn set_part_opacity(&self, part: &str, opacity: f32) {
        report("setPartOpacity", part, scene_set_part_opacity(part, opacity));
    }
    fn set_part_local_position(&self, part: &str, position: Vec3) {
        report(
            "setPartLocalPosition",
            part,
            scene_set_part_local_position(part, position.x, position.y, position.z),
        );
    }
}

impl HighlightHost for WebSceneHost {
    fn set_material_color(&self, renderer: &str, color: Vec4) {
        report(
            "setMaterialColor",
            renderer,
            scene_set_material_color(renderer, color.x, color.y, color.z, color.w),
        );
    }

    fn material_color(&self, renderer: &str) -> Option<Vec4> {
        let value = scene_material_color(renderer).ok()?;
        if !js_sys::Array::is_array(&value) {
            return None;
        }
        let arr = js_sys::Array::from(&value);
        let channel = |i: u32| arr.get(i).as_f64().map(|v| v as f32);
        Some(Vec4::new(
            channel(0)?,
            channel(1)?,
            channel(2)?,
            channel(3).unwrap_or(1.0),
        ))
    }
}

impl AnimationHost for WebSceneHost {
    fn trigger_animation(&self, animator: &str, trigger: &str) {
        report("triggerAnimation", animator, scene_trigger_animation(animator, trigger));
    }
}

pub struct WebAudioHost {
    pub base_path: String,
}

impl AudioHost for WebAudioHost {
    fn play_one_shot(&self, clip: &str) {
        let src = format!("{}/{}.mp3", self.base_path, clip);
        match web::HtmlAudioElement::new_with_src(&src) {
            Ok(el) => {
                // autoplay may be blocked until the first user gesture
                _ = el.play();
            }
            Err(e) => log::error!("[audio] {} failed: {:?}", src, e),
        }
    }
}

pub struct WebNavigationHost;

impl NavigationHost for WebNavigationHost {
    fn open_external_page(&self, url: &str) {
        if let Some(w) = web::window() {
            if let Err(e) = w.open_with_url_and_target(url, "_blank") {
                log::error!("[nav] open {} failed: {:?}", url, e);
            }
        }
    }
}

/// Info windows as absolutely positioned cards over the canvas.
pub struct DomWindowHost {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    camera: Rc<RefCell<OrbitCamera>>,
    next: Cell<u32>,
    windows: RefCell<FnvHashMap<u32, (web::Element, Vec3)>>,
}

impl DomWindowHost {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        camera: Rc<RefCell<OrbitCamera>>,
    ) -> Self {
        Self {
            document,
            canvas,
            camera,
            next: Cell::new(1),
            windows: RefCell::new(FnvHashMap::default()),
        }
    }

    fn build_card(&self, spec: &InfoWindowSpec) -> Result<web::Element, JsValue> {
        let card = self.document.create_element("div")?;
        card.set_class_name("info-window");
        if let Some(icon) = &spec.icon {
            let img = self.document.create_element("img")?;
            img.set_attribute("src", icon)?;
            card.append_child(&img)?;
        }
        let title = self.document.create_element("h3")?;
        title.set_text_content(Some(&spec.title));
        card.append_child(&title)?;
        let body = self.document.create_element("p")?;
        body.set_text_content(Some(&spec.description));
        card.append_child(&body)?;

        card.set_attribute("style", "opacity:0")?;
        self.place_card(&card, spec.anchor);
        Ok(card)
    }

    /// Pin the card to the screen position of `anchor` under the current camera.
    fn place_card(&self, card: &web::Element, anchor: Vec3) {
        let Some(el) = card.dyn_ref::<web::HtmlElement>() else {
            return;
        };
        let rect = self.canvas.get_bounding_client_rect();
        let (w, h) = (rect.width() as f32, rect.height() as f32);
        let pos = match self.camera.borrow().project(anchor) {
            Some(ndc) => input::ndc_to_canvas(ndc.truncate(), w, h),
            None => Vec2::new(w * 0.5, h * 0.5),
        };
        let style = el.style();
        _ = style.set_property("left", &format!("{:.0}px", pos.x));
        _ = style.set_property("top", &format!("{:.0}px", pos.y));
    }
}

impl WindowHost for DomWindowHost {
    fn create_info_window(&self, spec: &InfoWindowSpec) -> Option<WindowHandle> {
        let layer = self.document.get_element_by_id(INFO_LAYER_ID)?;
        let card = match self.build_card(spec) {
            Ok(c) => c,
            Err(e) => {
                log::error!("[window] build {} failed: {:?}", spec.title, e);
                return None;
            }
        };
        if let Err(e) = layer.append_child(&card) {
            log::error!("[window] attach {} failed: {:?}", spec.title, e);
            return None;
        }
        let id = self.next.get();
        self.next.set(id.wrapping_add(1));
        self.windows.borrow_mut().insert(id, (card, spec.anchor));
        Some(WindowHandle(id))
    }

    fn destroy_window(&self, handle: WindowHandle) {
        if let Some((card, _)) = self.windows.borrow_mut().remove(&handle.0) {
            card.remove();
        }
    }

    fn set_window_opacity(&self, handle: WindowHandle, opacity: f32) {
        let windows = self.windows.borrow();
        let Some((card, anchor)) = windows.get(&handle.0) else {
            return;
        };
        // called every tick while the window lives, so it also follows camera orbits
        self.place_card(card, *anchor);
        if let Some(el) = card.dyn_ref::<web::HtmlElement>() {
            _ = el.style().set_property("opacity", &format!("{:.3}", opacity));
        }
    }
}

pub fn accessory_widget_id(variant: AccessoryVariant) -> String {
    format!("btn-accessory-{}", variant.name().to_lowercase())
}

pub fn toggle_widget_id(toggle: AttachmentToggle) -> &'static str {
    match toggle {
        AttachmentToggle::Primary => "toggle-primary",
        AttachmentToggle::Secondary => "toggle-secondary",
        AttachmentToggle::Both => "toggle-both",
    }
}

pub fn widget_id(widget: Widget) -> String {
    match widget {
        Widget::Accessory(v) => accessory_widget_id(v),
        Widget::Toggle(t) => toggle_widget_id(t).to_string(),
        Widget::Checkout => "btn-checkout".to_string(),
        Widget::ArView => "btn-ar".to_string(),
    }
}

pub struct DomUiHost {
    pub document: web::Document,
}

impl UiHost for DomUiHost {
    fn set_accessory_selected(&self, variant: AccessoryVariant, selected: bool) {
        dom::set_class(
            &self.document,
            &accessory_widget_id(variant),
            CLASS_SELECTED,
            selected,
        );
    }

    fn set_toggle_state(&self, toggle: AttachmentToggle, on: bool) {
        let id = toggle_widget_id(toggle);
        dom::set_class(&self.document, id, CLASS_SELECTED, on);
        if let Some(el) = self.document.get_element_by_id(id) {
            _ = el.set_attribute("aria-pressed", if on { "true" } else { "false" });
        }
    }

    fn set_interactable(&self, interactable: bool) {
        dom::set_class(&self.document, WIDGET_BAR_ID, "disabled", !interactable);
    }

    fn set_loading_visible(&self, visible: bool) {
        dom::set_visible(&self.document, LOADING_ID, visible);
    }

    fn pulse_widget(&self, widget: Widget) {
        let Some(el) = self.document.get_element_by_id(&widget_id(widget)) else {
            return;
        };
        let cl = el.class_list();
        _ = cl.remove_1(CLASS_PULSE);
        // force a reflow so the CSS animation restarts
        if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
            _ = h.offset_width();
        }
        _ = cl.add_1(CLASS_PULSE);
    }
}

/// Wire every browser host into the bundle the session consumes.
pub fn browser_hosts(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    camera: Rc<RefCell<OrbitCamera>>,
) -> Hosts {
    let scene = Rc::new(WebSceneHost);
    Hosts {
        visibility: Some(scene.clone()),
        highlight: Some(scene.clone()),
        animation: Some(scene),
        audio: Some(Rc::new(WebAudioHost {
            base_path: "audio".into(),
        })),
        window: Some(Rc::new(DomWindowHost::new(
            document.clone(),
            canvas.clone(),
            camera,
        ))),
        navigation: Some(Rc::new(WebNavigationHost)),
        ui: Some(Rc::new(DomUiHost {
            document: document.clone(),
        })),
    }
}
