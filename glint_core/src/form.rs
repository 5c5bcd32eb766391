// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enquiry form: field validation and simulated submission.
//!
//! [`validate`] is a pure function over the field values. [`FormController`]
//! presents its result (per-field error text and error class) and runs the
//! submission state machine:
//!
//! ```text
//! Idle --submit, valid--> Submitting --completion--> Success
//! Success --any control input | submit--> Idle
//! ```
//!
//! An invalid submit stays in `Idle` and only updates the error display. A
//! submit while `Submitting` is ignored; the submit control is disabled in
//! that state anyway.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::element::{Class, ElementId, ElementStore};

/// A validated form control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Parent's name.
    ParentName,
    /// Contact phone.
    Phone,
    /// Contact email (optional).
    Email,
    /// Child's name.
    ChildName,
    /// Class applied for.
    ClassApplying,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Self; 5] = [
        Self::ParentName,
        Self::Phone,
        Self::Email,
        Self::ChildName,
        Self::ClassApplying,
    ];

    /// DOM id of the control.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ParentName => "parentName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::ChildName => "childName",
            Self::ClassApplying => "classApplying",
        }
    }

    /// DOM id of the control's error text holder.
    #[must_use]
    pub const fn error_id(self) -> &'static str {
        match self {
            Self::ParentName => "parentNameError",
            Self::Phone => "phoneError",
            Self::Email => "emailError",
            Self::ChildName => "childNameError",
            Self::ClassApplying => "classError",
        }
    }

    /// Looks a field up by its control id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A control the user edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// One of the validated fields.
    Field(Field),
    /// Any other control in the form, such as a free-text message.
    Other(ElementId),
}

impl From<Field> for Control {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

/// Why a field failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// Empty after trimming.
    Required,
    /// Name shorter than three characters.
    InvalidName,
    /// Not a 10-digit mobile number starting with 6-9.
    InvalidPhone,
    /// Not shaped like `local@domain.tld`.
    InvalidEmail,
    /// No option selected.
    MustSelect,
}

impl FieldError {
    /// User-facing message for this error on `field`.
    #[must_use]
    pub const fn message(self, field: Field) -> &'static str {
        match (self, field) {
            (Self::Required, Field::ParentName) => "Parent name is required.",
            (Self::Required, Field::Phone) => "Phone number is required.",
            (Self::Required, Field::ChildName) => "Child's name is required.",
            (Self::Required, Field::Email) => "Email is required.",
            (Self::Required | Self::MustSelect, Field::ClassApplying) | (Self::MustSelect, _) => {
                "Please select a class."
            }
            (Self::InvalidName, _) => "Please enter a valid name.",
            (Self::InvalidPhone, _) => "Enter a valid 10-digit Indian mobile number.",
            (Self::InvalidEmail, _) => "Please enter a valid email address.",
        }
    }
}

/// Raw field values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Parent's name.
    pub parent_name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Child's name.
    pub child_name: String,
    /// Selected class.
    pub class_applying: String,
}

impl FormFields {
    /// Value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ParentName => &self.parent_name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::ChildName => &self.child_name,
            Field::ClassApplying => &self.class_applying,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::ParentName => &mut self.parent_name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::ChildName => &mut self.child_name,
            Field::ClassApplying => &mut self.class_applying,
        }
    }
}

/// Outcome of [`validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    errors: BTreeMap<Field, FieldError>,
}

impl Validation {
    /// Returns `true` when no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error for `field`, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Message for `field`; empty when the field passed.
    #[must_use]
    pub fn message(&self, field: Field) -> &'static str {
        self.error(field).map_or("", |e| e.message(field))
    }

    /// All failures, in form order.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<Field, FieldError> {
        &self.errors
    }
}

/// Validates all fields.
#[must_use]
pub fn validate(fields: &FormFields) -> Validation {
    let mut errors = BTreeMap::new();

    let parent = fields.parent_name.trim();
    if parent.is_empty() {
        errors.insert(Field::ParentName, FieldError::Required);
    } else if parent.chars().count() < 3 {
        errors.insert(Field::ParentName, FieldError::InvalidName);
    }

    let phone = fields.phone.trim();
    if phone.is_empty() {
        errors.insert(Field::Phone, FieldError::Required);
    } else if !is_valid_phone(phone) {
        errors.insert(Field::Phone, FieldError::InvalidPhone);
    }

    let email = fields.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(Field::Email, FieldError::InvalidEmail);
    }

    if fields.child_name.trim().is_empty() {
        errors.insert(Field::ChildName, FieldError::Required);
    }

    if fields.class_applying.is_empty() {
        errors.insert(Field::ClassApplying, FieldError::MustSelect);
    }

    Validation { errors }
}

/// Returns whether `raw` is an Indian mobile number.
///
/// Whitespace, `-` and `+` are stripped and the last ten characters must be
/// a digit 6-9 followed by nine digits. The stripped length is not checked
/// first, so a country prefix like `91` is tolerated.
#[must_use]
pub fn is_valid_phone(raw: &str) -> bool {
    let stripped: alloc::vec::Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '+')
        .collect();
    let tail = &stripped[stripped.len().saturating_sub(10)..];
    tail.len() == 10
        && matches!(tail[0], '6'..='9')
        && tail[1..].iter().all(char::is_ascii_digit)
}

/// Returns whether `raw` looks like `local@domain.tld`.
///
/// No whitespace, exactly one `@` with a non-empty local part, and a domain
/// with a `.` that is neither its first nor its last character.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Submission state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormState {
    /// Waiting for input.
    #[default]
    Idle,
    /// Simulated request in flight; the submit control is disabled.
    Submitting,
    /// Request finished; the success indicator is shown.
    Success,
}

/// Result of [`FormController::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Ignored,
    /// Validation failed on this many fields.
    Rejected(usize),
    /// Entered `Submitting`; the caller schedules completion.
    Started,
}

/// The elements the form drives. Any may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormElements {
    /// Controls, indexed in [`Field::ALL`] order.
    pub inputs: [Option<ElementId>; 5],
    /// Controls that are not validated but are edited and reset with the
    /// form.
    pub others: Vec<ElementId>,
    /// Error text holders, indexed in [`Field::ALL`] order.
    pub errors: [Option<ElementId>; 5],
    /// Submit control.
    pub submit: Option<ElementId>,
    /// Submit control label text.
    pub submit_label: Option<ElementId>,
    /// Submit control icon glyph.
    pub submit_icon: Option<ElementId>,
    /// Success indicator.
    pub success: Option<ElementId>,
}

impl FormElements {
    /// The control for `field`.
    #[must_use]
    pub const fn input(&self, field: Field) -> Option<ElementId> {
        self.inputs[field.index()]
    }

    /// The error text holder for `field`.
    #[must_use]
    pub const fn error(&self, field: Field) -> Option<ElementId> {
        self.errors[field.index()]
    }
}

/// Submit control label while idle.
pub const SEND_LABEL: &str = "Send Message";
/// Submit control label while submitting.
pub const SENDING_LABEL: &str = "Sending...";
const SEND_ICON: &str = "fas fa-paper-plane";
const SENDING_ICON: &str = "fas fa-spinner fa-spin";

/// Presents validation and runs the submission state machine.
#[derive(Clone, Debug, Default)]
pub struct FormController {
    elements: FormElements,
    state: FormState,
    errors: BTreeMap<Field, FieldError>,
}

impl FormController {
    /// Creates an idle form.
    #[must_use]
    pub fn new(elements: FormElements) -> Self {
        Self {
            elements,
            state: FormState::Idle,
            errors: BTreeMap::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Errors currently displayed.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<Field, FieldError> {
        &self.errors
    }

    /// Reads the current control values. Missing controls read as empty.
    #[must_use]
    pub fn fields(&self, store: &ElementStore) -> FormFields {
        let mut fields = FormFields::default();
        for field in Field::ALL {
            if let Some(input) = self.elements.input(field) {
                store.value(input).clone_into(fields.slot(field));
            }
        }
        fields
    }

    /// Handles a submit request.
    pub fn submit(&mut self, store: &mut ElementStore) -> SubmitOutcome {
        match self.state {
            FormState::Submitting => return SubmitOutcome::Ignored,
            FormState::Success => {
                self.state = FormState::Idle;
                self.show_success(store, false);
            }
            FormState::Idle => {}
        }

        let validation = validate(&self.fields(store));
        for field in Field::ALL {
            self.show_error(store, field, validation.error(field));
        }
        if !validation.is_valid() {
            return SubmitOutcome::Rejected(validation.errors().len());
        }

        self.state = FormState::Submitting;
        self.set_submit(store, true);
        SubmitOutcome::Started
    }

    /// Finishes the simulated request: shows success, clears every control,
    /// and re-enables submit.
    ///
    /// Returns `false` if no submission was in flight.
    pub fn complete(&mut self, store: &mut ElementStore) -> bool {
        if self.state != FormState::Submitting {
            return false;
        }
        self.state = FormState::Success;
        self.show_success(store, true);
        let controls = self.elements.inputs.iter().flatten();
        for &control in controls.chain(&self.elements.others) {
            store.set_value(control, String::new());
        }
        self.set_submit(store, false);
        true
    }

    /// Handles a user edit of `control`: records the value, clears the
    /// field's error, and hides the success indicator.
    pub fn input(
        &mut self,
        store: &mut ElementStore,
        control: impl Into<Control>,
        value: impl Into<String>,
    ) {
        match control.into() {
            Control::Field(field) => {
                if let Some(input) = self.elements.input(field) {
                    store.record_value(input, value);
                }
                self.show_error(store, field, None);
            }
            Control::Other(el) => store.record_value(el, value),
        }
        self.show_success(store, false);
        if self.state == FormState::Success {
            self.state = FormState::Idle;
        }
    }

    fn show_error(&mut self, store: &mut ElementStore, field: Field, error: Option<FieldError>) {
        match error {
            Some(e) => self.errors.insert(field, e),
            None => self.errors.remove(&field),
        };
        if let Some(el) = self.elements.error(field) {
            store.set_text(el, error.map_or("", |e| e.message(field)));
        }
        if let Some(input) = self.elements.input(field) {
            store.set_class(input, Class::Error, error.is_some());
        }
    }

    fn show_success(&self, store: &mut ElementStore, on: bool) {
        if let Some(el) = self.elements.success {
            store.set_class(el, Class::Show, on);
        }
    }

    fn set_submit(&self, store: &mut ElementStore, sending: bool) {
        if let Some(button) = self.elements.submit {
            store.set_disabled(button, sending);
        }
        if let Some(label) = self.elements.submit_label {
            store.set_text(label, if sending { SENDING_LABEL } else { SEND_LABEL });
        }
        if let Some(icon) = self.elements.submit_icon {
            store.set_icon(icon, if sending { SENDING_ICON } else { SEND_ICON });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(parent: &str, phone: &str, email: &str, child: &str, class: &str) -> FormFields {
        FormFields {
            parent_name: parent.into(),
            phone: phone.into(),
            email: email.into(),
            child_name: child.into(),
            class_applying: class.into(),
        }
    }

    fn mounted() -> (ElementStore, FormElements) {
        let mut store = ElementStore::new();
        let mut els = FormElements::default();
        for field in Field::ALL {
            els.inputs[field.index()] = Some(store.register(field.id()));
            els.errors[field.index()] = Some(store.register(field.error_id()));
        }
        els.submit = Some(store.register("submitBtn"));
        els.submit_label = Some(store.register("submitBtn span"));
        els.submit_icon = Some(store.register("submitBtn i"));
        els.success = Some(store.register("formSuccess"));
        (store, els)
    }

    fn fill(form: &mut FormController, store: &mut ElementStore, values: &FormFields) {
        for field in Field::ALL {
            form.input(store, field, values.get(field));
        }
    }

    #[test]
    fn short_parent_name_is_the_only_error() {
        let v = validate(&fields("Al", "9876543210", "", "Sam", "3"));
        assert!(!v.is_valid());
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.error(Field::ParentName), Some(FieldError::InvalidName));
        assert_eq!(v.message(Field::ParentName), "Please enter a valid name.");
        assert_eq!(v.message(Field::Phone), "");
    }

    #[test]
    fn prefixed_phone_passes() {
        let v = validate(&fields("Alice K", "919876543210", "", "Sam", "3"));
        assert!(v.is_valid(), "{v:?}");
    }

    #[test]
    fn required_fields_report_required() {
        let v = validate(&FormFields::default());
        assert_eq!(v.message(Field::ParentName), "Parent name is required.");
        assert_eq!(v.message(Field::Phone), "Phone number is required.");
        assert_eq!(v.message(Field::ChildName), "Child's name is required.");
        assert_eq!(v.message(Field::ClassApplying), "Please select a class.");
        assert_eq!(v.error(Field::Email), None);
    }

    #[test]
    fn phone_rules() {
        assert!(is_valid_phone("+91 98765-43210"));
        assert!(is_valid_phone("6000000000"));
        assert!(!is_valid_phone("5876543210"));
        assert!(!is_valid_phone("98765"));
        assert!(!is_valid_phone("98765abcde"));
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("parent@school.in"));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("parent@school"));
        assert!(!is_valid_email("@school.in"));
        assert!(!is_valid_email("pa rent@school.in"));
        assert!(!is_valid_email("a@b@c.d"));
        assert!(!is_valid_email("a@.in"));
        assert!(!is_valid_email("a@in."));
    }

    #[test]
    fn invalid_submit_shows_errors_and_stays_idle() {
        let (mut store, els) = mounted();
        let mut form = FormController::new(els.clone());
        fill(&mut form, &mut store, &fields("Al", "9876543210", "", "Sam", "3"));

        assert_eq!(form.submit(&mut store), SubmitOutcome::Rejected(1));
        assert_eq!(form.state(), FormState::Idle);
        let parent = els.input(Field::ParentName).unwrap();
        assert!(store.has_class(parent, Class::Error));
        assert_eq!(
            store.text(els.error(Field::ParentName).unwrap()),
            Some("Please enter a valid name.")
        );

        // Editing the field clears its error.
        form.input(&mut store, Field::ParentName, "Alice");
        assert!(!store.has_class(parent, Class::Error));
        assert_eq!(store.text(els.error(Field::ParentName).unwrap()), Some(""));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn valid_submit_runs_to_success() {
        let (mut store, els) = mounted();
        let mut form = FormController::new(els.clone());
        fill(&mut form, &mut store, &fields("Alice K", "9876543210", "", "Sam", "3"));

        assert_eq!(form.submit(&mut store), SubmitOutcome::Started);
        assert_eq!(form.state(), FormState::Submitting);
        let button = els.submit.unwrap();
        assert!(store.is_disabled(button));
        assert_eq!(store.text(els.submit_label.unwrap()), Some(SENDING_LABEL));
        assert_eq!(form.submit(&mut store), SubmitOutcome::Ignored);

        assert!(form.complete(&mut store));
        assert_eq!(form.state(), FormState::Success);
        assert!(!store.is_disabled(button));
        assert_eq!(store.text(els.submit_label.unwrap()), Some(SEND_LABEL));
        assert!(store.has_class(els.success.unwrap(), Class::Show));
        assert_eq!(store.value(els.input(Field::ParentName).unwrap()), "");
        assert!(!form.complete(&mut store));

        form.input(&mut store, Field::Phone, "9");
        assert_eq!(form.state(), FormState::Idle);
        assert!(!store.has_class(els.success.unwrap(), Class::Show));
    }

    #[test]
    fn unvalidated_controls_share_input_and_reset() {
        let (mut store, mut els) = mounted();
        let message = store.register("message");
        els.others.push(message);
        let mut form = FormController::new(els.clone());
        fill(&mut form, &mut store, &fields("Alice K", "9876543210", "", "Sam", "3"));
        form.input(&mut store, Control::Other(message), "Looking forward to it");
        assert_eq!(store.value(message), "Looking forward to it");

        assert_eq!(form.submit(&mut store), SubmitOutcome::Started);
        assert!(form.complete(&mut store));
        assert_eq!(store.value(message), "");
        assert!(store.evaluate().values.contains(&message.index()));

        form.input(&mut store, Control::Other(message), "One more thing");
        assert_eq!(form.state(), FormState::Idle);
        assert!(!store.has_class(els.success.unwrap(), Class::Show));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn controls_without_elements_read_empty() {
        let store = ElementStore::new();
        let form = FormController::new(FormElements::default());
        assert_eq!(form.fields(&store), FormFields::default());
        assert_eq!(Field::from_id("classApplying"), Some(Field::ClassApplying));
        assert_eq!(Field::from_id("nope"), None);
    }
}
