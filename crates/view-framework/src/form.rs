//! # Form State
//!
//! [`FormDraft`] holds two copies of a form's values: `initial`, the last
//! snapshot from the server, and `current`, what the user is editing. The
//! draft is dirty exactly when they differ.
//!
//! Field types are fixed per form by the [`FormValues`] implementation, which
//! is normally generated by [`form_values!`](crate::form_values). Values travel
//! through the untyped [`FieldValue`] at the handler boundary so that handlers
//! can also be looked up by field name; a value of the wrong shape is rejected
//! and leaves the draft untouched.

use crate::error::ViewError;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An untyped field value as produced by an input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FieldValue::Map(value)
    }
}

/// A Rust type a form field can hold.
pub trait FieldKind: Sized {
    const KIND: &'static str;

    fn to_value(&self) -> FieldValue;

    /// Gives the value back unchanged when its shape does not fit.
    fn from_value(value: FieldValue) -> Result<Self, FieldValue>;
}

impl FieldKind for String {
    const KIND: &'static str = "text";

    fn to_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Text(text) => Ok(text),
            other => Err(other),
        }
    }
}

impl FieldKind for bool {
    const KIND: &'static str = "flag";

    fn to_value(&self) -> FieldValue {
        FieldValue::Flag(*self)
    }

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Flag(flag) => Ok(flag),
            other => Err(other),
        }
    }
}

impl FieldKind for Vec<String> {
    const KIND: &'static str = "list";

    fn to_value(&self) -> FieldValue {
        FieldValue::List(self.clone())
    }

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::List(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl FieldKind for BTreeMap<String, String> {
    const KIND: &'static str = "map";

    fn to_value(&self) -> FieldValue {
        FieldValue::Map(self.clone())
    }

    fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Map(entries) => Ok(entries),
            other => Err(other),
        }
    }
}

/// The value set of one form.
pub trait FormValues: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// One variant per field.
    type Field: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    fn fields() -> &'static [Self::Field];

    fn field_name(field: Self::Field) -> &'static str;

    fn get(&self, field: Self::Field) -> FieldValue;

    /// Must leave `self` unchanged when it returns an error.
    fn set(&mut self, field: Self::Field, value: FieldValue) -> Result<(), ViewError>;

    fn field_by_name(name: &str) -> Option<Self::Field> {
        Self::fields()
            .iter()
            .copied()
            .find(|field| Self::field_name(*field) == name)
    }
}

type OnChange<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Editable draft of a form.
pub struct FormDraft<T: FormValues> {
    initial: T,
    current: T,
    on_change: Option<OnChange<T>>,
}

impl<T: FormValues> FormDraft<T> {
    pub fn new(snapshot: T) -> Self {
        Self {
            initial: snapshot.clone(),
            current: snapshot,
            on_change: None,
        }
    }

    /// Registers a callback run after every field mutation with the new values.
    pub fn with_on_change(mut self, on_change: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn values(&self) -> &T {
        &self.current
    }

    /// The snapshot the draft was derived from.
    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.current != self.initial
    }

    pub fn dirty_fields(&self) -> Vec<T::Field> {
        T::fields()
            .iter()
            .copied()
            .filter(|field| self.current.get(*field) != self.initial.get(*field))
            .collect()
    }

    pub fn handle(&mut self, field: T::Field, value: impl Into<FieldValue>) -> Result<(), ViewError> {
        self.current.set(field, value.into())?;
        self.notify();
        Ok(())
    }

    /// Handler lookup by field name, for inputs that only know their `name`.
    pub fn handle_named(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), ViewError> {
        let field = T::field_by_name(name)
            .ok_or_else(|| ViewError::Validation(format!("unknown field `{name}`")))?;
        self.handle(field, value)
    }

    /// Typed mutation; the generated `handle_<field>` methods go through here.
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.current);
        self.notify();
    }

    /// Discards the draft. Does not run the on-change callback.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    /// Marks `submitted` as the new server-confirmed snapshot.
    pub fn commit_submitted(&mut self, submitted: T) {
        self.initial = submitted;
    }

    /// Replaces both copies with a freshly fetched snapshot.
    pub fn rebase(&mut self, snapshot: T) {
        self.initial = snapshot.clone();
        self.current = snapshot;
    }

    fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change(&self.current);
        }
    }
}

impl<T: FormValues> std::fmt::Debug for FormDraft<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDraft")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// Declares a form value struct together with its field enum, its
/// [`FormValues`] implementation and a typed handler trait.
///
/// ```rust
/// use view_framework::{form_values, FormDraft};
///
/// form_values! {
///     pub struct ProfileForm {
///         pub name: String,
///         pub active: bool,
///     }
/// }
///
/// let mut draft = FormDraft::new(ProfileForm { name: "A".into(), active: true });
/// draft.handle_name("B".into());
/// assert!(draft.has_unsaved_changes());
/// assert_eq!(draft.dirty_fields(), vec![ProfileFormField::Name]);
/// ```
#[macro_export]
macro_rules! form_values {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $crate::__private::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            $vis struct $name {
                $( $(#[$fmeta])* $fvis $field: $ty, )*
            }

            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            $vis enum [<$name Field>] {
                $( [<$field:camel>], )*
            }

            impl $crate::form::FormValues for $name {
                type Field = [<$name Field>];

                fn fields() -> &'static [Self::Field] {
                    &[ $( [<$name Field>]::[<$field:camel>], )* ]
                }

                fn field_name(field: Self::Field) -> &'static str {
                    match field {
                        $( [<$name Field>]::[<$field:camel>] => stringify!($field), )*
                    }
                }

                fn get(&self, field: Self::Field) -> $crate::form::FieldValue {
                    match field {
                        $( [<$name Field>]::[<$field:camel>] =>
                            $crate::form::FieldKind::to_value(&self.$field), )*
                    }
                }

                fn set(
                    &mut self,
                    field: Self::Field,
                    value: $crate::form::FieldValue,
                ) -> ::std::result::Result<(), $crate::error::ViewError> {
                    match field {
                        $( [<$name Field>]::[<$field:camel>] => {
                            self.$field = <$ty as $crate::form::FieldKind>::from_value(value)
                                .map_err(|got| {
                                    $crate::error::ViewError::Validation(format!(
                                        "field `{}` expects {}, got {}",
                                        stringify!($field),
                                        <$ty as $crate::form::FieldKind>::KIND,
                                        got.kind()
                                    ))
                                })?;
                        } )*
                    }
                    Ok(())
                }
            }

            $vis trait [<$name Handlers>] {
                $( fn [<handle_ $field>](&mut self, value: $ty); )*
            }

            impl [<$name Handlers>] for $crate::form::FormDraft<$name> {
                $( fn [<handle_ $field>](&mut self, value: $ty) {
                    self.update(|values| values.$field = value);
                } )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    crate::form_values! {
        pub struct ProfileForm {
            pub name: String,
            pub active: bool,
            pub roles: Vec<String>,
        }
    }

    fn profile(name: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            active: true,
            roles: vec!["user".to_string()],
        }
    }

    #[test]
    fn test_edit_then_reset() {
        let mut draft = FormDraft::new(profile("A"));
        assert!(!draft.has_unsaved_changes());

        draft.handle(ProfileFormField::Name, "B").unwrap();
        assert_eq!(draft.values().name, "B");
        assert!(draft.has_unsaved_changes());
        assert_eq!(draft.dirty_fields(), vec![ProfileFormField::Name]);

        draft.reset();
        assert_eq!(draft.values().name, "A");
        assert!(!draft.has_unsaved_changes());

        // Idempotent
        draft.reset();
        assert_eq!(draft.values(), &profile("A"));
    }

    #[test]
    fn test_type_mismatch_leaves_draft_unchanged() {
        let mut draft = FormDraft::new(profile("A"));
        let err = draft.handle(ProfileFormField::Active, "yes").unwrap_err();
        assert!(matches!(err, ViewError::Validation(_)));
        assert!(draft.values().active);
        assert!(!draft.has_unsaved_changes());
    }

    #[test]
    fn test_named_and_typed_handlers() {
        let mut draft = FormDraft::new(profile("A"));
        draft
            .handle_named("roles", vec!["admin".to_string()])
            .unwrap();
        draft.handle_active(false);
        assert_eq!(draft.values().roles, vec!["admin".to_string()]);
        assert!(!draft.values().active);

        assert!(draft.handle_named("nickname", "x").is_err());
    }

    #[test]
    fn test_on_change_runs_after_edits_but_not_reset() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let mut draft = FormDraft::new(profile("A"))
            .with_on_change(move |values: &ProfileForm| log.lock().unwrap().push(values.name.clone()));

        draft.handle_name("B".to_string());
        draft.handle(ProfileFormField::Name, "C").unwrap();
        draft.reset();

        assert_eq!(*seen.lock().unwrap(), vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_commit_and_rebase_clear_dirty() {
        let mut draft = FormDraft::new(profile("A"));
        draft.handle_name("B".to_string());
        draft.commit_submitted(draft.values().clone());
        assert!(!draft.has_unsaved_changes());
        assert_eq!(draft.initial().name, "B");

        draft.handle_name("C".to_string());
        draft.rebase(profile("D"));
        assert_eq!(draft.values().name, "D");
        assert!(!draft.has_unsaved_changes());
    }
}
