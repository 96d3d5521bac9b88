//! # IR Optimizer
//!
//! Optimization passes that transform pages to reduce redundancy before
//! code generation.
//!
//! ## Optimization Passes
//!
//! 1. **Drop empty text**: `CenteredText` with an empty string draws nothing
//! 2. **Remove dead sizes**: A size change overridden before any text is drawn
//! 3. **Remove redundant sizes**: Don't emit SetFontSize(14) if already at 14

use super::ops::{Op, Page};

impl Page {
    /// Apply all optimization passes.
    pub fn optimize(self) -> Self {
        let ops = self.ops;
        let ops = drop_empty_text(ops);
        let ops = remove_dead_sizes(ops);
        let ops = remove_redundant_sizes(ops);
        Page { ops }
    }
}

fn drop_empty_text(ops: Vec<Op>) -> Vec<Op> {
    ops.into_iter()
        .filter(|op| !matches!(op, Op::CenteredText { text, .. } if text.is_empty()))
        .collect()
}

/// Remove size changes that are overridden (or never used) before any text.
fn remove_dead_sizes(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());

    for (i, op) in ops.iter().enumerate() {
        if let Op::SetFontSize(_) = op {
            let used = ops[i + 1..]
                .iter()
                .take_while(|next| !matches!(next, Op::SetFontSize(_)))
                .any(|next| matches!(next, Op::CenteredText { .. }));
            if !used {
                continue;
            }
        }
        result.push(op.clone());
    }

    result
}

/// Remove size changes that don't change the current size.
fn remove_redundant_sizes(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut current: Option<f32> = None;

    for op in ops {
        if let Op::SetFontSize(size) = op {
            if current == Some(size) {
                continue;
            }
            current = Some(size);
        }
        result.push(op);
    }

    result
}
