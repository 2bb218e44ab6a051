//! Per-frame driver.
//!
//! [`Shell`] packages the frame-loop body: poll and dispatch input through
//! the context stack, then redraw the component tree from the root. The
//! host's event loop calls [`Shell::frame`] once per tick; everything else
//! about the entry point stays with the application.

use trellis_core::ObjectId;
use trellis_draw::Canvas;

use crate::component::{ComponentStore, render_tree};
use crate::input::{ContextId, ContextStack, ContextStore, DispatchOrder, InputSource};

/// Owns the context machinery and drives one frame at a time.
pub struct Shell {
    contexts: ContextStore,
    stack: ContextStack,
    root: Option<ObjectId>,
}

impl Shell {
    /// Create a shell around a context store and its base context.
    ///
    /// # Panics
    ///
    /// Panics if `base` is not in `contexts` (see [`ContextStack::new`]).
    pub fn new(mut contexts: ContextStore, base: ContextId, order: DispatchOrder) -> Self {
        let stack = ContextStack::new(&mut contexts, base, order);
        Self {
            contexts,
            stack,
            root: None,
        }
    }

    /// Set the component drawn first each frame (with its subtree).
    pub fn set_root(&mut self, root: Option<ObjectId>) {
        self.root = root;
    }

    /// The current root component.
    pub fn root(&self) -> Option<ObjectId> {
        self.root
    }

    /// The context store.
    pub fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    /// The context store, mutably.
    pub fn contexts_mut(&mut self) -> &mut ContextStore {
        &mut self.contexts
    }

    /// The context stack.
    pub fn context_stack(&self) -> &ContextStack {
        &self.stack
    }

    /// The context stack, mutably (for pushes initiated by the host).
    pub fn context_stack_mut(&mut self) -> (&mut ContextStack, &mut ContextStore) {
        (&mut self.stack, &mut self.contexts)
    }

    /// Run one frame: poll + dispatch input, then redraw from the root.
    pub fn frame(
        &mut self,
        components: &mut ComponentStore,
        input: &mut dyn InputSource,
        canvas: &mut dyn Canvas,
    ) {
        self.stack.update(&mut self.contexts, components, input);
        if let Some(root) = self.root {
            render_tree(&*components, root, canvas);
        }
    }
}
