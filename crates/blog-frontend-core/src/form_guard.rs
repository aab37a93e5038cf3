//! Submit-time validation of the post authoring form.
//!
//! Both fields are re-checked on every submit, so a field that was marked
//! invalid is unmarked as soon as it passes.

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Body,
}

impl PostField {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
        }
    }
}

/// Result of checking one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: PostField,
    pub valid: bool,
}

/// Marker-class instruction for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOp {
    AddInvalid(PostField),
    RemoveInvalid(PostField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardReport {
    pub title: FieldCheck,
    pub body: FieldCheck,
}

impl GuardReport {
    #[must_use]
    pub const fn allows_submit(&self) -> bool {
        self.title.valid && self.body.valid
    }

    /// One instruction per field, in form order.
    #[must_use]
    pub fn marks(&self) -> [MarkOp; 2] {
        [self.title, self.body].map(|check| {
            if check.valid {
                MarkOp::RemoveInvalid(check.field)
            } else {
                MarkOp::AddInvalid(check.field)
            }
        })
    }

    /// Errors for the failing fields, title first.
    #[must_use]
    pub fn errors(&self) -> Vec<Error> {
        [self.title, self.body]
            .into_iter()
            .filter(|check| !check.valid)
            .map(|check| Error::BlankField(check.field.name().to_string()))
            .collect()
    }
}

#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check the title and (already synced) body values.
#[must_use]
pub fn validate_post(title: &str, body: &str) -> GuardReport {
    let report = GuardReport {
        title: FieldCheck {
            field: PostField::Title,
            valid: !is_blank(title),
        },
        body: FieldCheck {
            field: PostField::Body,
            valid: !is_blank(body),
        },
    };
    if !report.allows_submit() {
        tracing::debug!(
            title_ok = report.title.valid,
            body_ok = report.body.valid,
            "post form blocked"
        );
    }
    report
}
