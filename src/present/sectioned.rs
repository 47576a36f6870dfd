//! Sectioned view of a structured prompt.

use crate::structured::StructuredPrompt;

/// One numbered section of the sectioned view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Schema field shown as the section body.
    pub field: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The five displayed sections, in order.
///
/// `reasoning_strategy` has no section of its own; it is shown as a labeled
/// block at the end of section 3 (see [`REASONING_LABEL`]).
pub const SECTIONS: [Section; 5] = [
    Section {
        field: "system_role",
        title: "1. 系统与角色 (System & Role)",
        description: "定义模型是谁（角色），以及它的总体目标。",
    },
    Section {
        field: "context_variables",
        title: "2. 上下文与变量 (Context & Variables)",
        description: "任务的背景信息以及需要动态替换的参数。",
    },
    Section {
        field: "instructions_constraints",
        title: "3. 指令与约束 (Instructions & Constraints)",
        description: "积极的“做什么”和消极的“不做什么”。",
    },
    Section {
        field: "few_shot_examples",
        title: "4. 示例 (Few-Shot Examples)",
        description: "提供输入输出的样本以指导模型。",
    },
    Section {
        field: "output_format",
        title: "5. 输出格式 (Output Format)",
        description: "严格定义的JSON Schema。",
    },
];

/// Heading of the reasoning block inside section 3.
pub const REASONING_LABEL: &str = "推理策略 (Reasoning Strategy)";

const HOST_FIELD: &str = "instructions_constraints";

/// Render all sections as plain text.
pub fn render_sectioned(prompt: &StructuredPrompt) -> String {
    let mut out = String::new();
    for (i, section) in SECTIONS.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n", section.title));
        out.push_str(&format!("{}\n\n", section.description));
        out.push_str(prompt.field(section.field).unwrap_or_default());
        out.push('\n');

        if section.field == HOST_FIELD && !prompt.reasoning_strategy.trim().is_empty() {
            out.push_str(&format!("\n【{}】\n", REASONING_LABEL));
            out.push_str(&prompt.reasoning_strategy);
            out.push('\n');
        }
    }
    out
}
