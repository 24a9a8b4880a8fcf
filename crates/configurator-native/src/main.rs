//! Headless driver: runs the configurator session against logging hosts and
//! plays a scripted tour at a fixed 60 Hz tick.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use configurator_core::{
    AccessoryVariant, AnimationHost, AttachmentToggle, AudioHost, ConfiguratorConfig,
    HighlightHost, Hosts, InfoWindowSpec, InputFrame, InstanceGate, KeyCode, NavigationHost,
    OrbitCamera, Ray, SessionCoordinator, UiCommand, UiHost, VisibilityHost, Widget, WindowHandle,
    WindowHost,
};
use glam::{Vec3, Vec4};
use smallvec::smallvec;

const TICK: Duration = Duration::from_micros(16_667);

static SESSION_GATE: InstanceGate = InstanceGate::new();

/// Logs every host call instead of touching a scene.
#[derive(Default)]
struct LoggingHosts {
    next_window: Cell<u32>,
}

impl VisibilityHost for LoggingHosts {
    fn set_part_visible(&self, part: &str, visible: bool) {
        log::debug!("[scene] {} visible={}", part, visible);
    }
    fn set_part_opacity(&self, part: &str, opacity: f32) {
        log::trace!("[scene] {} opacity={:.2}", part, opacity);
    }
    fn set_part_local_position(&self, part: &str, position: Vec3) {
        log::trace!(
            "[scene] {} at ({:.3},{:.3},{:.3})",
            part,
            position.x,
            position.y,
            position.z
        );
    }
}

impl HighlightHost for LoggingHosts {
    fn set_material_color(&self, renderer: &str, color: Vec4) {
        log::trace!(
            "[scene] {} color=({:.2},{:.2},{:.2},{:.2})",
            renderer,
            color.x,
            color.y,
            color.z,
            color.w
        );
    }
}

impl AnimationHost for LoggingHosts {
    fn trigger_animation(&self, animator: &str, trigger: &str) {
        log::info!("[scene] {} <- {}", animator, trigger);
    }
}

impl AudioHost for LoggingHosts {
    fn play_one_shot(&self, clip: &str) {
        log::info!("[audio] {}", clip);
    }
}

impl WindowHost for LoggingHosts {
    fn create_info_window(&self, spec: &InfoWindowSpec) -> Option<WindowHandle> {
        let id = self.next_window.get() + 1;
        self.next_window.set(id);
        log::info!("[window] #{} '{}': {}", id, spec.title, spec.description);
        Some(WindowHandle(id))
    }
    fn destroy_window(&self, handle: WindowHandle) {
        log::info!("[window] #{} closed", handle.0);
    }
    fn set_window_opacity(&self, handle: WindowHandle, opacity: f32) {
        log::trace!("[window] #{} opacity={:.2}", handle.0, opacity);
    }
}

impl NavigationHost for LoggingHosts {
    fn open_external_page(&self, url: &str) {
        log::info!("[nav] open {}", url);
    }
}

impl UiHost for LoggingHosts {
    fn set_accessory_selected(&self, variant: AccessoryVariant, selected: bool) {
        log::debug!("[ui] {} selected={}", variant.name(), selected);
    }
    fn set_toggle_state(&self, toggle: AttachmentToggle, on: bool) {
        log::debug!("[ui] toggle {:?}={}", toggle, on);
    }
    fn set_interactable(&self, interactable: bool) {
        log::debug!("[ui] interactable={}", interactable);
    }
    fn set_loading_visible(&self, visible: bool) {
        log::info!("[ui] loading={}", visible);
    }
    fn pulse_widget(&self, widget: Widget) {
        log::debug!("[ui] pulse {:?}", widget);
    }
}

fn logging_hosts() -> Hosts {
    let h = Rc::new(LoggingHosts::default());
    Hosts {
        visibility: Some(h.clone()),
        highlight: Some(h.clone()),
        animation: Some(h.clone()),
        audio: Some(h.clone()),
        window: Some(h.clone()),
        navigation: Some(h.clone()),
        ui: Some(h),
    }
}

struct Driver {
    session: SessionCoordinator,
    camera: OrbitCamera,
}

impl Driver {
    fn frame(&self) -> InputFrame {
        InputFrame {
            viewer: self.camera.eye(),
            ..InputFrame::default()
        }
    }

    fn aim_at(&self, target: Vec3, press: bool) -> InputFrame {
        let eye = self.camera.eye();
        InputFrame {
            pointer_ray: Some(Ray::new(eye, target - eye)),
            primary_pressed: press,
            ..self.frame()
        }
    }

    fn run(&mut self, total: Duration) {
        let frame = self.frame();
        let mut t = Duration::ZERO;
        while t < total {
            self.session.tick(TICK, &frame);
            t += TICK;
        }
    }

    fn step(&mut self, frame: InputFrame) {
        self.session.tick(TICK, &frame);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let session =
        SessionCoordinator::launch(&SESSION_GATE, ConfiguratorConfig::default(), logging_hosts())?;
    let mut driver = Driver {
        session,
        camera: OrbitCamera::default(),
    };

    log::info!("[tour] select Werewolf");
    driver.step(InputFrame {
        commands: vec![UiCommand::SelectAccessory(AccessoryVariant::Werewolf)],
        ..driver.frame()
    });
    driver.run(Duration::from_millis(1500));

    let ear = driver
        .session
        .features()
        .point_by_name("Ear")
        .and_then(|id| driver.session.features().config(id))
        .map(|c| c.anchor)
        .ok_or_else(|| anyhow::anyhow!("no Ear hotspot configured"))?;
    log::info!("[tour] hover and click Ear");
    driver.step(driver.aim_at(ear, false));
    driver.step(driver.aim_at(ear, true));
    driver.run(Duration::from_millis(3500));

    log::info!("[tour] show both attachments");
    driver.step(InputFrame {
        keys: smallvec![KeyCode::E],
        ..driver.frame()
    });

    log::info!("[tour] checkout");
    driver.step(InputFrame {
        keys: smallvec![KeyCode::C],
        ..driver.frame()
    });
    driver.run(Duration::from_millis(1200));

    let ui = driver.session.ui().state();
    let perf = driver.session.perf_stats();
    println!(
        "accessory={} selection={} toggles={:?} ui_active={} ticks={} fps={:.1}",
        driver.session.accessories().current().name(),
        ui.current_accessory_selection.name(),
        ui.toggles,
        ui.active,
        perf.ticks,
        perf.fps
    );
    Ok(())
}
