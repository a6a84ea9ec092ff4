//! Question value object and the built-in English bank

use serde::{Deserialize, Serialize};

/// One multiple-choice assessment question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    /// Cache key for the spoken prompt (question plus read-out options)
    pub fn prompt_cache_key(&self) -> String {
        format!("question-{}-with-options", self.id)
    }

    /// Build the text spoken for this question: the question followed by
    /// each option introduced with the localized option word.
    pub fn prompt_text(&self, option_word: &str) -> String {
        let mut text = format!("{}. ", self.text);
        for (index, option) in self.options.iter().enumerate() {
            text.push_str(&format!("{} {}: {}. ", option_word, index + 1, option));
        }
        text
    }
}

/// The built-in English question bank
pub fn english_questions() -> Vec<Question> {
    fn q(id: u32, text: &str, options: [&str; 4]) -> Question {
        Question {
            id,
            text: text.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        q(
            1,
            "What type of problems do you enjoy solving the most?",
            [
                "Protecting systems and finding security vulnerabilities",
                "Creating visual designs and user interfaces",
                "Analyzing data patterns and making predictions",
                "Building and connecting hardware devices",
            ],
        ),
        q(
            2,
            "Which activity sounds most interesting to you?",
            [
                "Hacking ethically to test security systems",
                "Training AI models to recognize patterns",
                "Developing mobile or web applications",
                "Managing cloud infrastructure and servers",
            ],
        ),
        q(
            3,
            "What kind of work environment appeals to you?",
            [
                "Working independently on complex analytical tasks",
                "Collaborating in teams to build products",
                "Research-focused with continuous learning",
                "Fast-paced with automation and deployments",
            ],
        ),
        q(
            4,
            "Which subject or skill do you find most engaging?",
            [
                "Mathematics and statistics",
                "Creative design and user experience",
                "System architecture and optimization",
                "Networking and distributed systems",
            ],
        ),
        q(
            5,
            "What motivates you in a career?",
            [
                "Making the digital world safer",
                "Creating innovative solutions using AI",
                "Building applications used by millions",
                "Working with cutting-edge technology",
            ],
        ),
        q(
            6,
            "How do you prefer to learn new technologies?",
            [
                "Hands-on experimentation and breaking things",
                "Reading research papers and documentation",
                "Building projects from tutorials",
                "Solving real-world problems practically",
            ],
        ),
        q(
            7,
            "Which type of project excites you the most?",
            [
                "Building a secure authentication system",
                "Creating a game with immersive graphics",
                "Developing a chatbot using machine learning",
                "Setting up automated deployment pipelines",
            ],
        ),
        q(
            8,
            "What kind of impact do you want to make?",
            [
                "Prevent cyber attacks and protect privacy",
                "Make technology more accessible and user-friendly",
                "Solve complex problems with data insights",
                "Enable seamless connectivity between devices",
            ],
        ),
        q(
            9,
            "Which skill are you most interested in developing?",
            [
                "Penetration testing and ethical hacking",
                "Deep learning and neural networks",
                "Full-stack web development",
                "Blockchain and decentralized systems",
            ],
        ),
        q(
            10,
            "What type of challenges do you enjoy?",
            [
                "Finding vulnerabilities before attackers do",
                "Optimizing algorithms for better performance",
                "Creating responsive and beautiful interfaces",
                "Scaling systems to handle millions of users",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_ten_questions() {
        assert_eq!(english_questions().len(), 10);
    }

    #[test]
    fn every_question_has_four_options() {
        for question in english_questions() {
            assert_eq!(question.options.len(), 4, "question {}", question.id);
        }
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let ids: Vec<u32> = english_questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn prompt_cache_key_uses_id() {
        let question = &english_questions()[0];
        assert_eq!(question.prompt_cache_key(), "question-1-with-options");
    }

    #[test]
    fn prompt_text_reads_out_numbered_options() {
        let question = &english_questions()[0];
        let prompt = question.prompt_text("Option");
        assert!(prompt.starts_with("What type of problems"));
        assert!(prompt.contains("Option 1: Protecting systems"));
        assert!(prompt.contains("Option 4: Building and connecting"));
    }
}
