//! A small item hierarchy with declared ancestry.

use std::any::{Any, TypeId};

use lazybind_core::{TypeChain, ViewItem};

/// Root item type of the test hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub text: String,
}

impl Note {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl ViewItem for Note {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<Note>()
    }
}

/// A note pinned to the top of a list; extends [`Note`] by composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedNote {
    pub note: Note,
    pub rank: u32,
}

impl PinnedNote {
    pub fn new(note: Note, rank: u32) -> Self {
        Self { note, rank }
    }
}

impl ViewItem for PinnedNote {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<PinnedNote>().extending::<Note>()
    }

    fn as_type(&self, id: TypeId) -> Option<&dyn Any> {
        if id == TypeId::of::<PinnedNote>() {
            Some(self)
        } else if id == TypeId::of::<Note>() {
            Some(&self.note)
        } else {
            None
        }
    }
}

/// A note moved out of the active list; extends [`Note`] by composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchivedNote {
    pub note: Note,
}

impl ArchivedNote {
    pub fn new(note: Note) -> Self {
        Self { note }
    }
}

impl ViewItem for ArchivedNote {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<ArchivedNote>().extending::<Note>()
    }

    fn as_type(&self, id: TypeId) -> Option<&dyn Any> {
        if id == TypeId::of::<ArchivedNote>() {
            Some(self)
        } else if id == TypeId::of::<Note>() {
            Some(&self.note)
        } else {
            None
        }
    }
}

/// List divider unrelated to the note hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Separator;

impl ViewItem for Separator {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<Separator>()
    }
}
