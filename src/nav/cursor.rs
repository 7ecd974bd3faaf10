/// Which level of the two-level tree the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLevel {
    GroupList,
    InsideGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub group: usize,
    /// Meaningful only when level is InsideGroup.
    pub element: usize,
    pub level: NavLevel,
}

impl Cursor {
    pub fn top() -> Self {
        Self {
            group: 0,
            element: 0,
            level: NavLevel::GroupList,
        }
    }

    pub fn inside(group: usize) -> Self {
        Self {
            group,
            element: 0,
            level: NavLevel::InsideGroup,
        }
    }
}

/// One-shot declarative instruction recorded before an action expected to
/// mutate the host tree, consumed by exactly the next rebuild. If the named
/// target is gone after the rebuild, the cursor falls back to the default
/// position without error.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingIntent {
    /// Land inside the group with this display name, wherever it moved to.
    RestoreGroup(String),
    /// Land inside the folder group with this name.
    EnterFolder(String),
    /// Land on the active overlay's tab strip.
    EnterOverlayTabs,
    /// Land inside the active overlay's content group.
    EnterOverlayContent,
    /// Land inside the first folder group.
    EnterFirstFolder,
    /// Land inside the n-th folder group.
    EnterFolderAt(usize),
}

impl PendingIntent {
    /// RestoreGroup outranks every narrower auto-entry request.
    pub fn outranks(&self, other: &PendingIntent) -> bool {
        matches!(self, PendingIntent::RestoreGroup(_))
            && !matches!(other, PendingIntent::RestoreGroup(_))
    }
}
