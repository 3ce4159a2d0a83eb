//! Instruction-mix categories and normalization
//!
//! Profilers report executed instruction counts per category. Dividing each
//! count by the total gives the relative frequency of that category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction category reported by the profiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Single-precision floating point
    Fp32,
    /// Double-precision floating point
    Fp64,
    /// Special/transcendental floating point (sin, exp, rsqrt, ...)
    Trans,
    /// Integer arithmetic
    IntOps,
    /// Bit-convert and shift
    Convert,
    /// Inter-thread (warp shuffle, vote)
    Warp,
    /// Control flow and logic
    Logic,
    /// Everything else
    Misc,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Category; 8] = [
        Category::Fp32,
        Category::Fp64,
        Category::Trans,
        Category::IntOps,
        Category::Convert,
        Category::Warp,
        Category::Logic,
        Category::Misc,
    ];

    /// Profiler CSV column holding this category's instruction count
    pub fn column(self) -> &'static str {
        match self {
            Category::Fp32 => "FP Instructions(Single)",
            Category::Fp64 => "FP Instructions(Double)",
            Category::Trans => "Floating Point Operations(Single Precision Special)",
            Category::IntOps => "Integer Instructions",
            Category::Convert => "Bit-Convert Instructions",
            Category::Warp => "Inter-Thread Instructions",
            Category::Logic => "Control-Flow Instructions",
            Category::Misc => "Misc Instructions",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Label set used when presenting the convert and misc categories
///
/// The same two source columns have been published under two naming schemes.
/// Both are supported; neither is treated as authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LabelSet {
    /// `Conv` for bit-convert, `Misc` for miscellaneous
    #[default]
    ConvMisc,
    /// `Shift` for bit-convert, `Conv` for miscellaneous
    ShiftConv,
}

impl LabelSet {
    /// Display label for a category under this label set
    pub fn label(self, category: Category) -> &'static str {
        match (category, self) {
            (Category::Fp32, _) => "FP32",
            (Category::Fp64, _) => "FP64",
            (Category::Trans, _) => "Trans",
            (Category::IntOps, _) => "IntOps",
            (Category::Convert, LabelSet::ConvMisc) => "Conv",
            (Category::Convert, LabelSet::ShiftConv) => "Shift",
            (Category::Warp, _) => "Warp",
            (Category::Logic, _) => "Logic",
            (Category::Misc, LabelSet::ConvMisc) => "Misc",
            (Category::Misc, LabelSet::ShiftConv) => "Conv",
        }
    }

    /// Labels for all categories in report order
    pub fn labels(self) -> [&'static str; 8] {
        Category::ALL.map(|c| self.label(c))
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelSet::ConvMisc => write!(f, "conv-misc"),
            LabelSet::ShiftConv => write!(f, "shift-conv"),
        }
    }
}

/// Raw per-category instruction counts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstructionCounts {
    counts: [f64; 8],
}

impl InstructionCounts {
    pub fn new(counts: [f64; 8]) -> Self {
        Self { counts }
    }

    pub fn get(&self, category: Category) -> f64 {
        self.counts[category.index()]
    }

    /// Sum of all categories
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Divide every category by the total
    ///
    /// Returns `None` when the total is zero or not finite (a NaN/infinite
    /// count, or finite counts whose sum overflows).
    pub fn normalize(&self) -> Option<InstructionMix> {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return None;
        }
        Some(InstructionMix {
            ratios: self.counts.map(|count| count / total),
        })
    }
}

/// Normalized instruction mix; components sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstructionMix {
    ratios: [f64; 8],
}

impl InstructionMix {
    /// Fraction of instructions in `category`
    pub fn ratio(&self, category: Category) -> f64 {
        self.ratios[category.index()]
    }

    /// `(category, ratio)` pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.ratio(c)))
    }

    /// Sum of all ratios (1.0 up to rounding)
    pub fn sum(&self) -> f64 {
        self.ratios.iter().sum()
    }

    /// Category with the largest share; earliest category wins ties
    pub fn dominant(&self) -> Category {
        let mut best = Category::Fp32;
        for (category, ratio) in self.iter() {
            if ratio > self.ratio(best) {
                best = category;
            }
        }
        best
    }
}
