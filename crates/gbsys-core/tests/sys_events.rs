use gbsys_core::axis::HatPosition;
use gbsys_core::config::SysConfig;
use gbsys_core::dispatch::Poll;
use gbsys_core::headless::{HeadlessHost, HostCall};
use gbsys_core::host::{HostEvent, Modifiers, Visibility};
use gbsys_core::keymap::KeyMap;
use gbsys_core::keys::{InputEvent, KeyCode};
use gbsys_core::Sys;

const RETURN: i32 = 13;
const UP_ARROW: i32 = 0x4000_0052;

fn keymap() -> KeyMap {
    KeyMap::new([(RETURN, KeyCode::ENTER), (UP_ARROW, KeyCode::UP)])
}

fn sys_with(host: HeadlessHost, config: SysConfig) -> Sys<HeadlessHost> {
    let mut sys = Sys::new(host, keymap(), config);
    sys.pre_init();
    sys.init().unwrap();
    sys
}

fn drained(sys: &mut Sys<HeadlessHost>) -> Vec<InputEvent> {
    sys.events().drain().collect()
}

fn x_axis(value: i16) -> HostEvent {
    HostEvent::JoyAxis { axis: 0, value }
}

#[test]
fn stick_sweep_posts_four_events_for_five_readings() {
    let mut sys = sys_with(HeadlessHost::new(), SysConfig::default());
    let mut seen = Vec::new();

    for value in [0, 4000, 4000, -4000, 0] {
        sys.video_mut().host_mut().push_event(x_axis(value));
        assert_eq!(sys.poll_events(), Poll::Continue);
        seen.push(drained(&mut sys));
    }

    assert_eq!(
        seen,
        vec![
            vec![],
            vec![InputEvent::press(KeyCode::JOY_RIGHT)],
            vec![],
            vec![
                InputEvent::release(KeyCode::JOY_RIGHT),
                InputEvent::press(KeyCode::JOY_LEFT),
            ],
            vec![InputEvent::release(KeyCode::JOY_LEFT)],
        ]
    );
}

#[test]
fn poll_drains_everything_in_arrival_order() {
    let mut sys = sys_with(HeadlessHost::new(), SysConfig::default());
    sys.video_mut().host_mut().push_events([
        HostEvent::KeyDown {
            sym: UP_ARROW,
            mods: Modifiers::empty(),
        },
        HostEvent::JoyButtonDown(0),
        HostEvent::JoyHat(HatPosition::RightDown),
        HostEvent::KeyUp { sym: b'z' as i32 },
        HostEvent::JoyButtonUp(0),
    ]);

    assert_eq!(sys.poll_events(), Poll::Continue);
    assert_eq!(sys.video().host().pending_events(), 0);
    assert_eq!(
        drained(&mut sys),
        vec![
            InputEvent::press(KeyCode::UP),
            InputEvent::press(KeyCode::JOY0),
            InputEvent::press(KeyCode::JOY_RIGHT),
            InputEvent::press(KeyCode::JOY_DOWN),
            InputEvent::release(KeyCode(b'z' as u16)),
            InputEvent::release(KeyCode::JOY0),
        ]
    );
}

#[test]
fn quit_stops_the_poll() {
    let mut sys = sys_with(HeadlessHost::new(), SysConfig::default());
    sys.video_mut().host_mut().push_events([
        HostEvent::JoyButtonDown(1),
        HostEvent::Quit,
        HostEvent::JoyButtonDown(2),
    ]);

    assert_eq!(sys.poll_events(), Poll::Quit);
    assert_eq!(drained(&mut sys), vec![InputEvent::press(KeyCode(513))]);
}

#[test]
fn minimizing_gates_presentation() {
    let mut sys = sys_with(HeadlessHost::new(), SysConfig::default());
    sys.video_mut().host_mut().clear_calls();

    sys.video_mut()
        .host_mut()
        .push_event(HostEvent::Window(Visibility::Hidden));
    sys.poll_events();
    assert!(!sys.video().frame_buffer().enabled);
    sys.begin_frame().unwrap().end();

    sys.video_mut()
        .host_mut()
        .push_event(HostEvent::Window(Visibility::Shown));
    sys.poll_events();
    assert!(sys.video().frame_buffer().enabled);
    sys.begin_frame().unwrap().end();

    let host = sys.video().host();
    assert_eq!(host.uploads(), 1);
    assert_eq!(host.count(&HostCall::Upload(1)), 1);
    assert!(sys.events().is_empty());
}

#[test]
fn window_shown_after_close_stays_disabled() {
    let mut sys = sys_with(HeadlessHost::new(), SysConfig::default());
    sys.close();

    sys.video_mut()
        .host_mut()
        .push_event(HostEvent::Window(Visibility::Shown));
    assert_eq!(sys.poll_events(), Poll::Continue);
    assert!(!sys.video().frame_buffer().enabled);

    sys.begin_frame().unwrap().end();
    assert_eq!(sys.video().host().uploads(), 0);
}

#[test]
fn alt_enter_reflags_the_window() {
    let mut sys = sys_with(HeadlessHost::new(), SysConfig::default());
    sys.video_mut().host_mut().push_events([
        HostEvent::KeyDown {
            sym: RETURN,
            mods: Modifiers::ALT | Modifiers::SHIFT,
        },
        HostEvent::KeyUp { sym: RETURN },
    ]);
    sys.poll_events();

    assert!(sys.video().fullscreen());
    assert_eq!(sys.video().host().count(&HostCall::SetFullscreen(true)), 1);
    assert_eq!(
        drained(&mut sys),
        vec![
            InputEvent::press(KeyCode::ENTER),
            InputEvent::release(KeyCode::ENTER),
        ]
    );
}

#[test]
fn alt_enter_respects_config() {
    let config = SysConfig {
        altenter: false,
        ..SysConfig::default()
    };
    let mut sys = sys_with(HeadlessHost::new(), config);
    sys.video_mut().host_mut().push_event(HostEvent::KeyDown {
        sym: RETURN,
        mods: Modifiers::ALT,
    });
    sys.poll_events();

    assert!(!sys.video().fullscreen());
    assert_eq!(drained(&mut sys), vec![InputEvent::press(KeyCode::ENTER)]);
}

#[test]
fn joystick_is_opened_when_enabled() {
    let mut sys = sys_with(HeadlessHost::new().with_joystick("pad"), SysConfig::default());
    assert_eq!(sys.joystick().map(|j| j.name.as_str()), Some("pad"));

    sys.close();
    assert!(sys.joystick().is_none());
    let host = sys.video().host();
    assert_eq!(host.count(&HostCall::CloseJoystick), 1);
    assert_eq!(host.count(&HostCall::Close), 1);
}

#[test]
fn missing_joystick_is_not_an_error() {
    let sys = sys_with(HeadlessHost::new(), SysConfig::default());
    assert!(sys.joystick().is_none());
    assert_eq!(sys.video().host().count(&HostCall::OpenJoystick), 1);
}

#[test]
fn joystick_can_be_switched_off() {
    let config = SysConfig {
        joy: false,
        ..SysConfig::default()
    };
    let mut sys = sys_with(HeadlessHost::new().with_joystick("pad"), config);
    assert!(sys.joystick().is_none());
    assert_eq!(sys.video().host().count(&HostCall::OpenJoystick), 0);

    sys.close();
    assert_eq!(sys.video().host().count(&HostCall::CloseJoystick), 0);
}

#[test]
fn fatal_init_error_surfaces() {
    let mut sys = Sys::new(HeadlessHost::failing("no display"), keymap(), SysConfig::default());
    assert!(sys.init().is_err());
    assert!(sys.begin_frame().is_err());
}
