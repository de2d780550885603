//! Share tokens
//!
//! A share token carries a name plus its mode in one string: a leading `#`
//! means reverse mode, a leading `@` means opposite mode, and a bare name
//! uses whatever mode accompanies it.

use crate::model::Mode;

const REVERSE_PREFIX: char = '#';
const OPPOSITE_PREFIX: char = '@';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareToken {
    pub name: String,
    pub mode: Mode,
}

/// Build a token for `name` under `mode`
pub fn encode(name: &str, mode: Mode) -> String {
    match mode {
        Mode::Normal => name.to_string(),
        Mode::Reverse => format!("{REVERSE_PREFIX}{name}"),
        Mode::Opposite => format!("{OPPOSITE_PREFIX}{name}"),
    }
}

/// Split a token into name and mode
///
/// A prefix always wins over `mode_param`; without one the parameter is
/// parsed leniently (unknown values mean `Normal`).
pub fn decode(data: &str, mode_param: Option<&str>) -> ShareToken {
    let data = data.trim();
    if let Some(name) = data.strip_prefix(REVERSE_PREFIX) {
        return ShareToken {
            name: name.to_string(),
            mode: Mode::Reverse,
        };
    }
    if let Some(name) = data.strip_prefix(OPPOSITE_PREFIX) {
        return ShareToken {
            name: name.to_string(),
            mode: Mode::Opposite,
        };
    }
    ShareToken {
        name: data.to_string(),
        mode: mode_param.map(Mode::from_param).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_select_mode() {
        assert_eq!(
            decode("#王伟", Some("0")),
            ShareToken {
                name: "王伟".to_string(),
                mode: Mode::Reverse
            }
        );
        assert_eq!(decode("@王伟", None).mode, Mode::Opposite);
        assert_eq!(decode("@王伟", None).name, "王伟");
    }

    #[test]
    fn test_plain_token_uses_param() {
        assert_eq!(decode("王伟", Some("2")).mode, Mode::Opposite);
        assert_eq!(decode("王伟", Some("9")).mode, Mode::Normal);
        assert_eq!(decode("王伟", Some("x")).mode, Mode::Normal);
        assert_eq!(decode(" 王伟 ", None).name, "王伟");
    }

    #[test]
    fn test_encode_matches_decode() {
        for mode in Mode::ALL {
            let token = encode("宋丹丹", mode);
            let decoded = decode(&token, None);
            assert_eq!(decoded.name, "宋丹丹");
            assert_eq!(decoded.mode, mode);
        }
        assert_eq!(encode("赵本山", Mode::Reverse), "#赵本山");
    }
}
