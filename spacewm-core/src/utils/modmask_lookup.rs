use crate::errors::{Result, SpaceError};
use bitflags::bitflags;
use serde::{de::Visitor, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Represents the state of modifier keys
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Used as the zero value
        const Zero = 0;
        const Shift = 1 << 1;
        const Control = 1 << 2;
        const Alt = 1 << 3;
        const Super = 1 << 6;
        const Keypad = 1 << 8;
        const GroupSwitch = 1 << 9;
    }
}

#[must_use]
pub fn into_mod(key: &str) -> Option<ModMask> {
    match key {
        "Shift" => Some(ModMask::Shift),
        "Ctrl" | "Control" => Some(ModMask::Control),
        "Mod1" | "Alt" => Some(ModMask::Alt),
        "Mod4" | "Super" | "Meta" => Some(ModMask::Super),
        "Num" | "Keypad" => Some(ModMask::Keypad),
        "GroupSwitch" => Some(ModMask::GroupSwitch),
        _ => None,
    }
}

const NAMES: [(ModMask, &str); 6] = [
    (ModMask::Super, "Meta"),
    (ModMask::Control, "Ctrl"),
    (ModMask::Alt, "Alt"),
    (ModMask::Shift, "Shift"),
    (ModMask::Keypad, "Num"),
    (ModMask::GroupSwitch, "GroupSwitch"),
];

// serde impls (derive is not working with the bitflags macro)

impl Serialize for ModMask {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for ModMask {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ModmaskVisitor;

        impl<'de> Visitor<'de> for ModmaskVisitor {
            type Value = ModMask;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a bitfield on 16 bits")
            }

            fn visit_u16<E>(self, v: u16) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ModMask::from_bits_retain(v))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u16::try_from(v)
                    .map(ModMask::from_bits_retain)
                    .map_err(|_| E::custom("modifier mask out of range"))
            }
        }

        deserializer.deserialize_u16(ModmaskVisitor)
    }
}

/// A single key chord, such as `Alt+Shift+Backtab`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: ModMask,
    pub key: String,
}

impl KeyCombo {
    pub fn new(modifiers: ModMask, key: &str) -> Self {
        Self {
            modifiers,
            key: key.to_owned(),
        }
    }

    /// The same key with the given modifiers removed.
    #[must_use]
    pub fn without(&self, modifiers: ModMask) -> Self {
        Self {
            modifiers: self.modifiers.difference(modifiers),
            key: self.key.clone(),
        }
    }

    pub fn is_key(&self, key: &str) -> bool {
        self.key == key
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (mask, name) in NAMES {
            if self.modifiers.contains(mask) {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = SpaceError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SpaceError::InvalidKeySequence(s.to_owned());
        let s = s.trim();
        // a trailing '+' is the plus key itself
        let (mods, key) = match s.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None if s == "+" => ("", "+"),
            None => s.rsplit_once('+').unwrap_or(("", s)),
        };
        if key.is_empty() {
            return Err(invalid());
        }
        let mut modifiers = ModMask::Zero;
        for name in mods.split('+').filter(|m| !m.is_empty()) {
            modifiers |= into_mod(name.trim()).ok_or_else(invalid)?;
        }
        Ok(Self::new(modifiers, key.trim()))
    }
}

/// Up to four alternative chords bound to the same action.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySequence(Vec<KeyCombo>);

impl KeySequence {
    pub const MAX_COMBOS: usize = 4;

    pub fn new(combos: Vec<KeyCombo>) -> Self {
        let mut combos = combos;
        combos.truncate(Self::MAX_COMBOS);
        Self(combos)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn combos(&self) -> &[KeyCombo] {
        &self.0
    }

    pub fn contains(&self, combo: &KeyCombo) -> bool {
        self.0.contains(combo)
    }

    /// Modifiers of the primary chord, `None` when it has none.
    pub fn modifiers(&self) -> Option<ModMask> {
        self.0
            .first()
            .map(|combo| combo.modifiers)
            .filter(|mods| !mods.is_empty())
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(", "))
    }
}

impl FromStr for KeySequence {
    type Err = SpaceError;

    fn from_str(s: &str) -> Result<Self> {
        let combos = s
            .split(", ")
            .filter(|part| !part.trim().is_empty())
            .map(KeyCombo::from_str)
            .collect::<Result<Vec<_>>>()?;
        if combos.len() > Self::MAX_COMBOS {
            return Err(SpaceError::InvalidKeySequence(s.to_owned()));
        }
        Ok(Self(combos))
    }
}
