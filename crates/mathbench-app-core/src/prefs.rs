// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Workbench preferences shared by every panel.

use serde::{Deserialize, Serialize};

/// Saved preferences for the whole workbench.
///
/// Every section is `#[serde(default)]` so a prefs file written by an older
/// build (or edited by hand) still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkbenchPrefs {
    /// 3D surface viewer.
    pub viewport: ViewportPrefs,
    /// 2D function plotter.
    pub plot: PlotPrefs,
    /// Equation and document editors.
    pub editor: EditorPrefs,
    /// Symbolic calculator.
    pub calculator: CalculatorPrefs,
}

/// Render surface size, tessellation resolution and camera inertia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportPrefs {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Parametric segments along u.
    pub slices: u32,
    /// Parametric segments along v.
    pub stacks: u32,
    /// Orbit-controls damping factor (0 disables inertia).
    pub damping: f32,
    /// Redraw rate.
    pub fps: u32,
}

impl Default for ViewportPrefs {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            slices: 50,
            stacks: 50,
            damping: 0.05,
            fps: 60,
        }
    }
}

/// Plot window and sampling density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotPrefs {
    /// Inclusive x range.
    pub x_range: [f64; 2],
    /// Visible y range.
    pub y_range: [f64; 2],
    /// Number of sampling intervals.
    pub samples: usize,
}

impl Default for PlotPrefs {
    fn default() -> Self {
        Self {
            x_range: [-10.0, 10.0],
            y_range: [-10.0, 10.0],
            samples: 1000,
        }
    }
}

/// Editor behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPrefs {
    /// Quiet period before re-typesetting, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

/// Calculator behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorPrefs {
    /// Mode selected when the calculator opens.
    pub default_mode: String,
}

impl Default for CalculatorPrefs {
    fn default() -> Self {
        Self {
            default_mode: "evaluate".to_string(),
        }
    }
}
