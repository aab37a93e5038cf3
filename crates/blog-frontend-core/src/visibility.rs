//! Password visibility toggle.

/// How an input renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Obscured,
    Plain,
}

impl InputMode {
    /// Anything other than `password` renders plainly.
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("password") {
            Self::Obscured
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Obscured => "password",
            Self::Plain => "text",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Obscured => Self::Plain,
            Self::Plain => Self::Obscured,
        }
    }
}

/// Icon classes for the two modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPair {
    /// Shown while the value is obscured (click to reveal).
    pub obscured: String,
    /// Shown while the value is plain (click to hide).
    pub plain: String,
}

impl IconPair {
    #[must_use]
    pub fn new(obscured: impl Into<String>, plain: impl Into<String>) -> Self {
        Self {
            obscured: obscured.into(),
            plain: plain.into(),
        }
    }

    #[must_use]
    pub fn for_mode(&self, mode: InputMode) -> &str {
        match mode {
            InputMode::Obscured => &self.obscured,
            InputMode::Plain => &self.plain,
        }
    }
}

/// DOM changes for one click on a toggle icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome<'a> {
    pub input_type: &'static str,
    pub remove_class: &'a str,
    pub add_class: &'a str,
}

/// Flip the mode of an input currently of type `current_type`.
#[must_use]
pub fn toggle<'a>(current_type: &str, icons: &'a IconPair) -> ToggleOutcome<'a> {
    let from = InputMode::from_input_type(current_type);
    let to = from.flipped();
    ToggleOutcome {
        input_type: to.input_type(),
        remove_class: icons.for_mode(from),
        add_class: icons.for_mode(to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn icons() -> IconPair {
        IconPair::new("bi-eye", "bi-eye-slash")
    }

    #[test]
    fn password_becomes_text_with_slashed_eye() {
        let icons = icons();
        let out = toggle("password", &icons);
        assert_eq!(out.input_type, "text");
        assert_eq!(out.remove_class, "bi-eye");
        assert_eq!(out.add_class, "bi-eye-slash");
    }

    #[test]
    fn text_becomes_password_with_eye() {
        let icons = icons();
        let out = toggle("text", &icons);
        assert_eq!(out.input_type, "password");
        assert_eq!(out.remove_class, "bi-eye-slash");
        assert_eq!(out.add_class, "bi-eye");
    }

    proptest! {
        #[test]
        fn even_clicks_restore_original(start_obscured in any::<bool>(), pairs in 0usize..20) {
            let icons = icons();
            let start = if start_obscured { InputMode::Obscured } else { InputMode::Plain };
            let mut input_type = start.input_type();
            let mut class = icons.for_mode(start).to_string();
            for _ in 0..pairs * 2 {
                let out = toggle(input_type, &icons);
                prop_assert_eq!(class.as_str(), out.remove_class);
                input_type = out.input_type;
                class = out.add_class.to_string();
            }
            prop_assert_eq!(input_type, start.input_type());
            prop_assert_eq!(class.as_str(), icons.for_mode(start));
        }
    }
}
