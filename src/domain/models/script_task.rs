const OPTIMIZE_INSTRUCTION: &str = "Refactor this Unity C# code to make it more optimized: ";
const COMMENT_INSTRUCTION: &str = "Add comments to this Unity C# code to make it more clear: ";
const CODE_ONLY_SUFFIX: &str =
    " Don't include any note nor explanation in the response. I only need the code body.";

/// What to ask the model to do with a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptTask {
    Optimize,
    Comment,
    Custom {
        instruction: String,
        include_script: bool,
    },
}

impl ScriptTask {
    pub fn custom(instruction: impl Into<String>, include_script: bool) -> Self {
        ScriptTask::Custom {
            instruction: instruction.into(),
            include_script,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScriptTask::Optimize => "optimize",
            ScriptTask::Comment => "comment",
            ScriptTask::Custom { .. } => "custom",
        }
    }

    /// Build the prompt text sent for `script`.
    pub fn prompt_for(&self, script: &str) -> String {
        let body = match self {
            ScriptTask::Optimize => format!("{}{}", OPTIMIZE_INSTRUCTION, script),
            ScriptTask::Comment => format!("{}{}", COMMENT_INSTRUCTION, script),
            ScriptTask::Custom {
                instruction,
                include_script: true,
            } => format!("{}: {}", instruction, script),
            ScriptTask::Custom {
                instruction,
                include_script: false,
            } => instruction.clone(),
        };
        wrap_code_only(&body)
    }
}

/// Append the "code body only" instruction.
pub fn wrap_code_only(prompt: &str) -> String {
    format!("{}{}", prompt, CODE_ONLY_SUFFIX)
}

/// Drop leading `\n` characters from a model reply.
pub fn strip_leading_newlines(reply: &str) -> &str {
    reply.trim_start_matches('\n')
}
