use gbsys_core::keymap::KeyMap;
use gbsys_core::keys::KeyCode;
use sdl2::keyboard::Keycode;

/// SDL keysyms that don't map to themselves. Letters and digits fall through
/// to their ASCII value, so they aren't listed.
const SDL_KEYS: &[(Keycode, KeyCode)] = &[
    (Keycode::Backspace, KeyCode::BACKSPACE),
    (Keycode::Tab, KeyCode::TAB),
    (Keycode::Return, KeyCode::ENTER),
    (Keycode::Escape, KeyCode::ESC),
    (Keycode::Space, KeyCode::SPACE),
    (Keycode::Delete, KeyCode::DELETE),
    (Keycode::Minus, KeyCode::from_ascii(b'-')),
    (Keycode::Equals, KeyCode::from_ascii(b'=')),
    (Keycode::LeftBracket, KeyCode::from_ascii(b'[')),
    (Keycode::RightBracket, KeyCode::from_ascii(b']')),
    (Keycode::Backslash, KeyCode::from_ascii(b'\\')),
    (Keycode::Semicolon, KeyCode::from_ascii(b';')),
    (Keycode::Quote, KeyCode::from_ascii(b'\'')),
    (Keycode::Backquote, KeyCode::from_ascii(b'`')),
    (Keycode::Comma, KeyCode::from_ascii(b',')),
    (Keycode::Period, KeyCode::from_ascii(b'.')),
    (Keycode::Slash, KeyCode::from_ascii(b'/')),
    (Keycode::LShift, KeyCode::SHIFT),
    (Keycode::RShift, KeyCode::SHIFT),
    (Keycode::LCtrl, KeyCode::CTRL),
    (Keycode::RCtrl, KeyCode::CTRL),
    (Keycode::LAlt, KeyCode::ALT),
    (Keycode::RAlt, KeyCode::ALT),
    (Keycode::Up, KeyCode::UP),
    (Keycode::Down, KeyCode::DOWN),
    (Keycode::Right, KeyCode::RIGHT),
    (Keycode::Left, KeyCode::LEFT),
    (Keycode::Insert, KeyCode::INS),
    (Keycode::Home, KeyCode::HOME),
    (Keycode::End, KeyCode::END),
    (Keycode::PageUp, KeyCode::PRIOR),
    (Keycode::PageDown, KeyCode::NEXT),
    (Keycode::CapsLock, KeyCode::CAPS),
    (Keycode::NumLockClear, KeyCode::NUMLOCK),
    (Keycode::ScrollLock, KeyCode::SCROLL),
    (Keycode::Pause, KeyCode::PAUSE),
    (Keycode::F1, KeyCode::F1),
    (Keycode::F2, KeyCode::F2),
    (Keycode::F3, KeyCode::F3),
    (Keycode::F4, KeyCode::F4),
    (Keycode::F5, KeyCode::F5),
    (Keycode::F6, KeyCode::F6),
    (Keycode::F7, KeyCode::F7),
    (Keycode::F8, KeyCode::F8),
    (Keycode::F9, KeyCode::F9),
    (Keycode::F10, KeyCode::F10),
    (Keycode::F11, KeyCode::F11),
    (Keycode::F12, KeyCode::F12),
    (Keycode::Kp0, KeyCode::NUM0),
    (Keycode::Kp1, KeyCode::NUM1),
    (Keycode::Kp2, KeyCode::NUM2),
    (Keycode::Kp3, KeyCode::NUM3),
    (Keycode::Kp4, KeyCode::NUM4),
    (Keycode::Kp5, KeyCode::NUM5),
    (Keycode::Kp6, KeyCode::NUM6),
    (Keycode::Kp7, KeyCode::NUM7),
    (Keycode::Kp8, KeyCode::NUM8),
    (Keycode::Kp9, KeyCode::NUM9),
    (Keycode::KpPlus, KeyCode::NUMPLUS),
    (Keycode::KpMinus, KeyCode::NUMMINUS),
    (Keycode::KpMultiply, KeyCode::NUMMUL),
    (Keycode::KpDivide, KeyCode::NUMDIV),
    (Keycode::KpPeriod, KeyCode::NUMDOT),
    (Keycode::KpEnter, KeyCode::NUMENTER),
];

pub fn sdl_keymap() -> KeyMap {
    KeyMap::new(SDL_KEYS.iter().map(|&(key, code)| (key.into_i32(), code)))
}
