//! Niftimal display mode cycle

use crate::contract::NiftimalMode;

/// Next mode along `disabled → compact → full → disabled`
pub fn advance(current: NiftimalMode) -> NiftimalMode {
    match current {
        NiftimalMode::Disabled => NiftimalMode::Compact,
        NiftimalMode::Compact => NiftimalMode::Full,
        NiftimalMode::Full => NiftimalMode::Disabled,
    }
}

/// Mode for a raw stored value; absent, empty or unknown reads as disabled
pub fn mode_from_store(raw: Option<&str>) -> NiftimalMode {
    raw.and_then(NiftimalMode::parse_stored).unwrap_or_default()
}

/// Glyph on the niftimal toggle, `None` when the nif digit is hidden
pub fn glyph(mode: NiftimalMode, sezimal_digits: bool) -> Option<&'static str> {
    match mode {
        NiftimalMode::Disabled => None,
        NiftimalMode::Compact if sezimal_digits => Some("\u{f1e23}"),
        NiftimalMode::Compact => Some("5\u{306}"),
        NiftimalMode::Full => Some("Z"),
    }
}
