//! Indented text dump of an entry and its subtree

use std::fmt;

use crate::entry::{EntryId, Value};
use crate::Tree;

/// Display adapter returned by [`Tree::display`].
///
/// Prints one line per entry, children indented by two spaces:
///
/// ```text
/// Entry: server (anchor: main) = (list: 2)
///   Entry: port = 8080 (qint)
///   Entry: backup = server (sref: main)
/// ```
pub struct EntryDisplay<'t> {
    tree: &'t Tree,
    id: EntryId,
}

impl Tree {
    /// Render `id` and everything below it. Read-only.
    pub fn display(&self, id: EntryId) -> EntryDisplay<'_> {
        EntryDisplay { tree: self, id }
    }

    fn display_name(&self, id: EntryId) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => "<anon>".to_string(),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, root: EntryId) -> fmt::Result {
        let mut stack = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            self.write_line(f, id, depth)?;
            if let Value::List(children) = self.value(id) {
                stack.extend(children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
        Ok(())
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>, id: EntryId, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}Entry: {}", "", self.display_name(id), indent = depth * 2)?;
        if let Some(anchor) = self.anchor(id) {
            write!(f, " (anchor: {anchor})")?;
        }
        f.write_str(" = ")?;

        match self.value(id) {
            Value::Null => writeln!(f, "(null)"),
            Value::Integer(n) => writeln!(f, "{n} (qint)"),
            Value::Float(n) => writeln!(f, "{n} (qfloat)"),
            Value::QuotedString(s) => writeln!(f, "{s} (qstr: {})", s.len()),
            Value::SoftReference(target) => {
                let resolved = match self.follow(id) {
                    Some(found) => self.display_name(found),
                    None => "<none>".to_string(),
                };
                writeln!(f, "{resolved} (sref: {target})")
            }
            Value::HardReference(target) => {
                let resolved = match target {
                    Some(found) => self.display_name(*found),
                    None => "<none>".to_string(),
                };
                writeln!(f, "{resolved} (ref)")
            }
            Value::List(children) => writeln!(f, "(list: {})", children.len()),
        }
    }
}

impl fmt::Display for EntryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_tree(f, self.id)
    }
}
