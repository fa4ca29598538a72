use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session::{is_blank, write_full_response, QuitMatch};
use crate::application::{ChatClient, Console};
use crate::domain::{ChatRequest, DomainError, Settings};

pub const CODING_PERSONA: &str = "You are a helpful AI assistant that helps programmers write code.";
pub const DEFAULT_FUNCTION_FILE: &str = "../sample-code/function/function.cs";
pub const DEFAULT_GO_FISH_FILE: &str = "../sample-code/go-fish/go-fish.cs";
pub const DEFAULT_OUTPUT_FILE: &str = "result/app.txt";

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

const MENU: &str = "\n1: Add comments to my function\n\
2: Write unit tests for my function\n\
3: Fix my Go Fish game\n\
\"quit\" to exit the program\n\n\
Enter a number to select a task:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTask {
    AddComments,
    WriteUnitTests,
    FixGoFish,
}

impl CodeTask {
    pub fn from_selection(selection: &str) -> Option<Self> {
        match selection.trim() {
            "1" => Some(CodeTask::AddComments),
            "2" => Some(CodeTask::WriteUnitTests),
            "3" => Some(CodeTask::FixGoFish),
            _ => None,
        }
    }
}

/// Sample source files the menu tasks operate on.
#[derive(Debug, Clone)]
pub struct SampleFiles {
    pub function: PathBuf,
    pub go_fish: PathBuf,
}

impl SampleFiles {
    pub fn for_task(&self, task: CodeTask) -> &Path {
        match task {
            CodeTask::AddComments | CodeTask::WriteUnitTests => &self.function,
            CodeTask::FixGoFish => &self.go_fish,
        }
    }
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self {
            function: PathBuf::from(DEFAULT_FUNCTION_FILE),
            go_fish: PathBuf::from(DEFAULT_GO_FISH_FILE),
        }
    }
}

/// Menu-driven code generation: the selected sample file is appended to the
/// user's prompt and the model's answer is written to the output file.
pub struct CodeGenerationUseCase {
    client: Arc<dyn ChatClient>,
    settings: Settings,
    samples: SampleFiles,
    output_file: PathBuf,
    show_full_response: bool,
}

impl CodeGenerationUseCase {
    pub fn new(client: Arc<dyn ChatClient>, settings: Settings) -> Self {
        Self {
            client,
            settings,
            samples: SampleFiles::default(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            show_full_response: false,
        }
    }

    pub fn with_samples(mut self, samples: SampleFiles) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn with_full_response(mut self, show: bool) -> Self {
        self.show_full_response = show;
        self
    }

    pub async fn execute(&self, console: &mut dyn Console) -> Result<(), DomainError> {
        loop {
            console.write_line(MENU)?;
            let Some(command) = console.read_line()? else {
                debug!("End of input, leaving code generation");
                break;
            };

            if QuitMatch::Exact.matches(&command) {
                console.write_line("Exiting program...")?;
                break;
            }

            console.write_line("\nEnter a prompt: ")?;
            let Some(user_prompt) = console.read_line()? else {
                debug!("End of input, leaving code generation");
                break;
            };

            let Some(task) = CodeTask::from_selection(&command) else {
                console.write_line("Invalid input. Please try again.")?;
                continue;
            };

            if is_blank(&user_prompt) {
                console.write_line("Please enter a prompt.")?;
                continue;
            }

            let sample = self.samples.for_task(task);
            let code = match std::fs::read_to_string(sample) {
                Ok(code) => code,
                Err(e) => {
                    warn!("Failed to read sample {}: {}", sample.display(), e);
                    console.write_line(&format!("Unable to read {}: {}", sample.display(), e))?;
                    continue;
                }
            };
            debug!("Task {:?} using {} ({} bytes)", task, sample.display(), code.len());

            let prompt = format!("{}{}", user_prompt, code);
            if let Err(e) = self.generate(console, &prompt).await {
                warn!("Code generation failed: {}", e);
                console.write_line(&e.to_string())?;
            }
        }

        Ok(())
    }

    async fn generate(&self, console: &mut dyn Console, prompt: &str) -> Result<(), DomainError> {
        console.write_line("\nCalling Azure OpenAI to generate code...\n\n")?;

        let openai = self.settings.openai()?;

        let request = ChatRequest::new(&openai.deployment)
            .with_system(CODING_PERSONA)
            .with_user(prompt)
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let response = self.client.complete(&openai.connection, &request).await?;

        if self.show_full_response {
            write_full_response(console, &response)?;
        }

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.output_file, response.content())?;
        info!("Wrote {} bytes to {}", response.content().len(), self.output_file.display());

        console.write_line(&format!(
            "\nResponse written to {}\n\n",
            self.output_file.display()
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selection_maps_to_tasks() {
        assert_eq!(CodeTask::from_selection("1"), Some(CodeTask::AddComments));
        assert_eq!(CodeTask::from_selection(" 2 "), Some(CodeTask::WriteUnitTests));
        assert_eq!(CodeTask::from_selection("3"), Some(CodeTask::FixGoFish));
        assert_eq!(CodeTask::from_selection("4"), None);
        assert_eq!(CodeTask::from_selection(""), None);
    }

    #[test]
    fn first_two_tasks_share_the_function_sample() {
        let samples = SampleFiles::default();
        assert_eq!(
            samples.for_task(CodeTask::AddComments),
            samples.for_task(CodeTask::WriteUnitTests)
        );
        assert_eq!(
            samples.for_task(CodeTask::FixGoFish),
            Path::new(DEFAULT_GO_FISH_FILE)
        );
    }
}
