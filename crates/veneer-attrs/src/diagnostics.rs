//! Diagnostic control.
//!
//! Push/pop/disable/enable operations over the compiler's diagnostic
//! engine, dispatched per family. Families without a diagnostic-control
//! facility resolve every operation to the empty fragment; callers may
//! still nest push/pop freely, which [`DiagnosticStack`] tracks so a
//! translation unit can assert balance.

use veneer_toolchain::{Family, Toolchain};

use crate::dialect::{dialect_for, DiagnosticOp};
use crate::fragment::Fragment;

/// Diagnostic names the shadow-warning group silences, in emission order.
const SHADOW_WARNINGS: [&str; 3] = ["-Wshadow-compatible-local", "-Wshadow-local", "-Wshadow"];

/// Save the current diagnostic state.
pub fn push(toolchain: &Toolchain) -> Fragment {
    dispatch(toolchain, &DiagnosticOp::Push)
}

/// Restore the previously saved diagnostic state.
pub fn pop(toolchain: &Toolchain) -> Fragment {
    dispatch(toolchain, &DiagnosticOp::Pop)
}

/// Silence the named diagnostic.
pub fn disable(toolchain: &Toolchain, name: &str) -> Fragment {
    dispatch(toolchain, &DiagnosticOp::Disable(name))
}

/// Restore the named diagnostic to warning severity.
pub fn enable(toolchain: &Toolchain, name: &str) -> Fragment {
    dispatch(toolchain, &DiagnosticOp::Enable(name))
}

/// Promote the named diagnostic to an error.
pub fn promote_to_error(toolchain: &Toolchain, name: &str) -> Fragment {
    dispatch(toolchain, &DiagnosticOp::PromoteToError(name))
}

/// Silence a numbered diagnostic on the Microsoft ABI; nothing elsewhere.
pub fn msvc_disable(toolchain: &Toolchain, number: u32) -> Fragment {
    dispatch(toolchain, &DiagnosticOp::MsvcDisable(number))
}

/// Silence the named diagnostic only when the active toolchain is of the
/// given family. The family-scoped variant exists for diagnostics one
/// family knows and its siblings reject.
pub fn disable_for(toolchain: &Toolchain, family: Family, name: &str) -> Fragment {
    if toolchain.id.family == family {
        disable(toolchain, name)
    } else {
        Fragment::empty()
    }
}

/// Silence the shadow-warning group: three related diagnostics disabled
/// together, in a fixed order.
///
/// Gated on the externally supplied group-availability flag; without it
/// the group resolves to nothing — never to a partial subset.
pub fn disable_shadow_warnings(toolchain: &Toolchain) -> Fragment {
    if !toolchain.shadow_warning_group {
        return Fragment::empty();
    }
    Fragment::concat(SHADOW_WARNINGS.iter().map(|name| disable(toolchain, name)))
}

fn dispatch(toolchain: &Toolchain, op: &DiagnosticOp<'_>) -> Fragment {
    dialect_for(toolchain.id.family).diagnostic(op)
}

/// Per-translation-unit push/pop balance tracker.
///
/// The diagnostic engine's state machine is `clean -> pushed(depth) ->
/// clean`; depth may exceed one. Popping a clean stack still yields the
/// family's pop fragment (the layer never fails a build), the tracker
/// just saturates at zero.
#[derive(Debug)]
pub struct DiagnosticStack<'t> {
    toolchain: &'t Toolchain,
    depth: u32,
}

impl<'t> DiagnosticStack<'t> {
    /// A clean stack for one translation unit.
    pub fn new(toolchain: &'t Toolchain) -> Self {
        Self {
            toolchain,
            depth: 0,
        }
    }

    /// Enter a diagnostic scope.
    pub fn push(&mut self) -> Fragment {
        self.depth += 1;
        push(self.toolchain)
    }

    /// Leave a diagnostic scope.
    pub fn pop(&mut self) -> Fragment {
        self.depth = self.depth.saturating_sub(1);
        pop(self.toolchain)
    }

    /// Current nesting depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Has every push been matched by a pop?
    pub fn is_balanced(&self) -> bool {
        self.depth == 0
    }
}
