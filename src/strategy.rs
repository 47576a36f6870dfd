//! Reasoning strategies and the user's strategy selection.
//!
//! The selection is a set: toggling a strategy flips its membership and
//! nothing else. Whenever strategies are rendered into text they appear in
//! declaration order (`ChainOfThought`, `StepBack`, `SelfConsistency`) no
//! matter in which order they were toggled.

use clap::ValueEnum;
use std::collections::BTreeSet;
use std::fmt;

/// Separator used when joining strategy labels into request text.
pub const LABEL_SEPARATOR: &str = ", ";

/// Label used in request text when no strategy is selected.
pub const STANDARD_REASONING_LABEL: &str = "Standard reasoning";

/// A named reasoning technique to embed into the generated prompt.
///
/// Variant order is the canonical rendering order; `Ord` is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum ReasoningStrategy {
    /// Ask the model to show intermediate reasoning steps.
    #[value(name = "cot", alias = "chain-of-thought")]
    ChainOfThought,
    /// Ground the task in a general/macro question answered up front.
    #[value(name = "step-back", alias = "stepback")]
    StepBack,
    /// Sample several reasoning paths and vote on the consistent answer.
    #[value(name = "self-consistency", alias = "sc")]
    SelfConsistency,
}

impl ReasoningStrategy {
    /// All strategies in declaration order.
    pub const ALL: [ReasoningStrategy; 3] = [
        ReasoningStrategy::ChainOfThought,
        ReasoningStrategy::StepBack,
        ReasoningStrategy::SelfConsistency,
    ];

    /// Fixed label embedded into request text.
    pub fn label(self) -> &'static str {
        match self {
            ReasoningStrategy::ChainOfThought => "Chain of Thought (CoT)",
            ReasoningStrategy::StepBack => "Step-back Prompting",
            ReasoningStrategy::SelfConsistency => "Self-consistency",
        }
    }

    /// Bilingual name shown in listings.
    pub fn display_name(self) -> &'static str {
        match self {
            ReasoningStrategy::ChainOfThought => "思维链 (Chain of Thought, CoT)",
            ReasoningStrategy::StepBack => "后退一步 (Step-back Prompting)",
            ReasoningStrategy::SelfConsistency => "自洽性 (Self-consistency)",
        }
    }

    /// One-line description shown in listings.
    pub fn description(self) -> &'static str {
        match self {
            ReasoningStrategy::ChainOfThought => {
                "要求模型 \"Let's think step by step\"，展示中间推理过程。"
            }
            ReasoningStrategy::StepBack => {
                "让模型先回答一个与具体任务相关的“通用/宏观问题”，以激活相关知识。"
            }
            ReasoningStrategy::SelfConsistency => {
                "让模型多次生成推理路径，通过“投票”选出一致的答案。"
            }
        }
    }

    /// Name accepted on the command line and in session commands.
    pub fn cli_name(self) -> &'static str {
        match self {
            ReasoningStrategy::ChainOfThought => "cot",
            ReasoningStrategy::StepBack => "step-back",
            ReasoningStrategy::SelfConsistency => "self-consistency",
        }
    }

    /// Parse a strategy name (case-insensitive, aliases accepted).
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).ok()
    }
}

impl fmt::Display for ReasoningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of currently selected strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategySelection {
    selected: BTreeSet<ReasoningStrategy>,
}

impl StrategySelection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `strategy`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, strategy: ReasoningStrategy) -> bool {
        if self.selected.remove(&strategy) {
            false
        } else {
            self.selected.insert(strategy);
            true
        }
    }

    pub fn contains(&self, strategy: ReasoningStrategy) -> bool {
        self.selected.contains(&strategy)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected strategies in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ReasoningStrategy> + '_ {
        self.selected.iter().copied()
    }

    /// Labels of the selected strategies in declaration order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(ReasoningStrategy::label).collect()
    }

    /// The strategy clause for request text.
    ///
    /// Never empty: an empty selection renders as [`STANDARD_REASONING_LABEL`].
    pub fn clause(&self) -> String {
        if self.is_empty() {
            STANDARD_REASONING_LABEL.to_string()
        } else {
            self.labels().join(LABEL_SEPARATOR)
        }
    }
}

impl FromIterator<ReasoningStrategy> for StrategySelection {
    fn from_iter<I: IntoIterator<Item = ReasoningStrategy>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
