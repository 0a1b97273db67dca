//! Nesting trace of the recursive descent
//!
//! Every parse function opens a [`Trace`] at the depth its caller passed in.
//! The guard logs `BEGIN <name>` when created and `END <name>` when dropped,
//! indented by one tab per level, at `TRACE` level on the `comet_parser::trace`
//! target.

pub(crate) struct Trace {
    name: &'static str,
    depth: usize,
}

impl Trace {
    pub(crate) fn begin(name: &'static str, depth: usize) -> Self {
        tracing::trace!(target: "comet_parser::trace", "{}BEGIN {}", indent(depth), name);
        Self { name, depth }
    }
}

impl Drop for Trace {
    fn drop(&mut self) {
        tracing::trace!(target: "comet_parser::trace", "{}END {}", indent(self.depth), self.name);
    }
}

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}
