// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page element data model.
//!
//! An *element* is a DOM node the orchestrator reads from or writes to. Each
//! element has:
//!
//! - An identity ([`ElementId`]) assigned once at mount. Elements are never
//!   unregistered, so handles never go stale.
//! - **Declared attributes** ([`Attributes`]) copied from markup at mount:
//!   the reveal/counter delay and the counter target, kept as raw strings and
//!   parsed leniently by [`parse_int`].
//! - **Presented state** written by controllers: class flags
//!   ([`ClassFlags`]), text content, inline style ([`InlineStyle`]), the
//!   `disabled` flag, and form control values.
//!
//! Elements are stored in struct-of-arrays layout indexed by handle.
//!
//! # Dirty tracking
//!
//! Every presented-state mutation marks the matching channel in
//! [`dirty`](crate::dirty). Writing a value equal to the current one marks
//! nothing, so presenters never see no-op changes.
//! [`ElementStore::evaluate`] drains the channels into [`ElementChanges`].

mod attr;
mod evaluate;
mod id;
mod store;
mod style;

pub use attr::{Attributes, parse_int};
pub use evaluate::ElementChanges;
pub use id::ElementId;
pub use store::ElementStore;
pub use style::{Class, ClassFlags, Highlight, InlineStyle, Tilt, Transform};
