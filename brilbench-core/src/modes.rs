//! Optimization Mode Table
//!
//! The fixed, ordered list of optimization configurations every benchmark
//! is compiled under. The table is immutable process-wide state; callers
//! receive it by reference and never mutate it.

/// One named optimization configuration.
///
/// Each mode toggles the two optimization passes independently; the four
/// entries of [`MODES`] cover the full on/off cross product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptMode {
    /// Mode name, used for artifact file names and display.
    pub name: &'static str,
    /// Whether the egglog optimization pass is enabled.
    pub egglog: bool,
    /// Whether the brilift optimization pass is enabled.
    pub brilift: bool,
}

/// The mode table, in execution order.
pub const MODES: [OptMode; 4] = [
    OptMode {
        name: "no_optimize",
        egglog: false,
        brilift: false,
    },
    OptMode {
        name: "brilift_only",
        egglog: false,
        brilift: true,
    },
    OptMode {
        name: "egglog_only",
        egglog: true,
        brilift: false,
    },
    OptMode {
        name: "optimize_both",
        egglog: true,
        brilift: true,
    },
];

impl OptMode {
    /// Render this mode as build-tool toggle arguments, in fixed order.
    pub fn flags(&self) -> Vec<String> {
        vec![
            "--optimize-egglog".to_owned(),
            self.egglog.to_string(),
            "--optimize-brilift".to_owned(),
            self.brilift.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_is_fixed() {
        let names: Vec<&str> = MODES.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            ["no_optimize", "brilift_only", "egglog_only", "optimize_both"]
        );
    }

    #[test]
    fn table_covers_the_toggle_cross_product() {
        let toggles: Vec<(bool, bool)> = MODES.iter().map(|m| (m.egglog, m.brilift)).collect();
        assert_eq!(
            toggles,
            [(false, false), (false, true), (true, false), (true, true)]
        );
    }

    #[test]
    fn flags_render_both_toggles() {
        let flags = MODES[1].flags();
        assert_eq!(
            flags,
            ["--optimize-egglog", "false", "--optimize-brilift", "true"]
        );
    }
}
