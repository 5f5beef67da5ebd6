use crate::keys::KeyCode;

/// Host key symbol. Printable keys carry their ASCII value, as SDL keysyms do.
pub type HostSym = i32;

/// Ordered host-symbol to key-code table, built once at startup.
#[derive(Clone, Debug, Default)]
pub struct KeyMap {
    entries: Vec<(HostSym, KeyCode)>,
}

impl KeyMap {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (HostSym, KeyCode)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Translates a host symbol. First table match wins; unmapped digits and
    /// lowercase letters pass through; everything else is `KeyCode::NONE`.
    pub fn map(&self, sym: HostSym) -> KeyCode {
        if let Some(&(_, code)) = self.entries.iter().find(|(s, _)| *s == sym) {
            return code;
        }
        match u8::try_from(sym) {
            Ok(c) if c.is_ascii_digit() || c.is_ascii_lowercase() => KeyCode::from_ascii(c),
            _ => KeyCode::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> KeyMap {
        KeyMap::new([
            (13, KeyCode::ENTER),
            (0x4000_0052, KeyCode::UP),
            // Remapping a letter overrides the passthrough.
            (b'q' as HostSym, KeyCode::ESC),
            (0x4000_0052, KeyCode::DOWN),
        ])
    }

    #[test]
    fn table_entries_win() {
        let km = small_map();
        assert_eq!(km.map(13), KeyCode::ENTER);
        assert_eq!(km.map(b'q' as HostSym), KeyCode::ESC);
    }

    #[test]
    fn first_entry_wins_on_duplicates() {
        assert_eq!(small_map().map(0x4000_0052), KeyCode::UP);
    }

    #[test]
    fn unmapped_alphanumerics_pass_through() {
        let km = small_map();
        for c in (b'a'..=b'z').chain(b'0'..=b'9').filter(|&c| c != b'q') {
            assert_eq!(km.map(c as HostSym), KeyCode(c as u16), "char {}", c as char);
        }
    }

    #[test]
    fn everything_else_maps_to_none() {
        let km = small_map();
        assert_eq!(km.map(b'A' as HostSym), KeyCode::NONE);
        assert_eq!(km.map(b'/' as HostSym), KeyCode::NONE);
        assert_eq!(km.map(-1), KeyCode::NONE);
        assert_eq!(km.map(0x4000_003A), KeyCode::NONE);
        assert_eq!(KeyMap::default().map(0), KeyCode::NONE);
    }
}
