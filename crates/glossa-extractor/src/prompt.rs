//! Prompt construction for vocabulary extraction

/// Stand-in used when the session language is blank
const UNNAMED_LANGUAGE: &str = "the target language";

/// Builds the extraction prompt for one document
pub struct PromptBuilder<'a> {
    text: &'a str,
    language: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, language: &'a str) -> Self {
        Self { text, language }
    }

    /// Build the complete extraction prompt
    ///
    /// The output depends only on the text and language.
    pub fn build(&self) -> String {
        let language = match self.language.trim() {
            "" => UNNAMED_LANGUAGE,
            named => named,
        };

        let mut prompt = String::with_capacity(self.text.len() + 700);
        prompt.push_str(&format!(
            "You are a language learning assistant. Extract all vocabulary words and \
             phrases from the following {} language course notes.\n\n",
            language
        ));
        prompt.push_str(
            "Return ONLY a JSON array of unique vocabulary items, each as a simple string. \
             Include:\n\
             - Individual words\n\
             - Common phrases\n\
             - Expressions\n\
             - Greetings\n\n\
             Do NOT include:\n\
             - Lesson titles\n\
             - Section headers\n",
        );
        prompt.push_str(&format!(
            "- English translations (only extract the {} text)\n",
            language
        ));
        prompt.push_str("- Duplicate entries\n\n");
        prompt.push_str(OUTPUT_FORMAT);
        prompt.push_str("\n\nDocument content:\n");
        prompt.push_str(self.text);

        prompt
    }
}

const OUTPUT_FORMAT: &str = r#"Return format: ["word1", "phrase 2", "word3", ...]"#;
