// Shared prompt types and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// A named assistant persona rendered into a single system prompt.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    pub instructions: &'static [&'static str],
}

impl Persona {
    /// Renders the persona as a system prompt: name, role, description,
    /// then the instructions as a numbered list.
    pub fn system_prompt(&self) -> String {
        let mut out = format!(
            "You are the {}.\n\nRole: {}\n\n{}",
            self.name,
            self.role,
            self.description.trim()
        );

        if !self.instructions.is_empty() {
            out.push_str("\n\nInstructions:");
            for (i, line) in self.instructions.iter().enumerate() {
                out.push_str(&format!("\n{}. {}", i + 1, line));
            }
        }

        out
    }
}

/// Fills `{key}` placeholders in a template.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
