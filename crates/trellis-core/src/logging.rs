//! Logging and debugging facilities for trellis.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for object trees
//!
//! # Tracing Integration
//!
//! trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`ObjectTreeDebug`] to get a readable view of a component hierarchy:
//!
//! ```ignore
//! use trellis_core::logging::ObjectTreeDebug;
//!
//! let debug = ObjectTreeDebug::new();
//! println!("{}", debug.format_tree(root_id)?);
//! ```

use crate::object::{ObjectId, ObjectResult, global_registry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Object model target.
    pub const OBJECT: &str = "trellis_core::object";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Component system target.
    pub const COMPONENT: &str = "trellis::component";
    /// Input dispatch target.
    pub const INPUT: &str = "trellis::input";
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_types: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing object trees.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Create a tree debug formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree debug formatter with the given options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the tree rooted at `id` as an indented listing.
    pub fn format_tree(&self, id: ObjectId) -> ObjectResult<String> {
        let registry = global_registry()?;
        let mut output = String::new();
        registry.with_read(|r| self.format_recursive(r, id, 0, &mut output))?;
        Ok(output)
    }

    fn format_recursive(
        &self,
        registry: &crate::object::ObjectRegistry,
        id: ObjectId,
        depth: usize,
        output: &mut String,
    ) -> ObjectResult<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let indent = " ".repeat(depth * self.options.indent_size);
        let name = registry.object_name(id)?;
        let name_display = if name.is_empty() { "(unnamed)" } else { name };

        output.push_str(&indent);
        if self.options.show_ids {
            output.push_str(&format!("[{id:?}] "));
        }
        output.push_str(name_display);
        if self.options.show_types {
            output.push_str(&format!(" ({})", registry.type_name(id)?));
        }
        output.push('\n');

        let children: Vec<ObjectId> = registry.children(id)?.to_vec();
        for child_id in children {
            self.format_recursive(registry, child_id, depth + 1, output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, ObjectBase, init_global_registry};

    struct Leaf {
        base: ObjectBase,
    }

    impl Leaf {
        fn new() -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
            }
        }
    }

    impl Object for Leaf {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    #[test]
    fn test_format_tree() {
        init_global_registry();

        let root = Leaf::new();
        root.base.set_name("root");
        let child = Leaf::new();
        child.base.set_name("child");
        child.base.set_parent(Some(root.object_id())).unwrap();

        let output = ObjectTreeDebug::with_options(TreeFormatOptions::minimal())
            .format_tree(root.object_id())
            .unwrap();

        assert!(output.starts_with("root\n"));
        assert!(output.contains("  child\n"));
    }
}
