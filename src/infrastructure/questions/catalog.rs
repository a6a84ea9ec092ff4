//! Translated question catalog
//!
//! Serves the built-in English bank directly and produces other
//! languages through the translator, caching each translated bank in
//! memory for the life of the process. Translation failures fall back
//! to English so the assessment can always proceed.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{QuestionSource, QuestionSourceError, Translator};
use crate::domain::assessment::{english_questions, Question};
use crate::domain::language::Language;

/// Question catalog backed by a translator
pub struct TranslatedQuestionCatalog<T>
where
    T: Translator,
{
    translator: T,
    cache: Mutex<HashMap<Language, Vec<Question>>>,
}

impl<T> TranslatedQuestionCatalog<T>
where
    T: Translator,
{
    /// Create a catalog seeded with the English bank
    pub fn new(translator: T) -> Self {
        let mut cache = HashMap::new();
        cache.insert(Language::En, english_questions());
        Self {
            translator,
            cache: Mutex::new(cache),
        }
    }

    async fn translate_bank(&self, language: Language) -> Result<Vec<Question>, ()> {
        let mut translated = Vec::with_capacity(english_questions().len());

        for question in english_questions() {
            let text = self
                .translator
                .translate(&question.text, language)
                .await
                .map_err(|_| ())?;
            let options = self
                .translator
                .translate_batch(&question.options, language)
                .await
                .map_err(|_| ())?;

            translated.push(Question {
                id: question.id,
                text,
                options,
            });
        }

        Ok(translated)
    }
}

#[async_trait]
impl<T> QuestionSource for TranslatedQuestionCatalog<T>
where
    T: Translator,
{
    async fn questions(&self, language: Language) -> Result<Vec<Question>, QuestionSourceError> {
        {
            let cache = self.cache.lock().await;
            if let Some(bank) = cache.get(&language) {
                return Ok(bank.clone());
            }
        }

        match self.translate_bank(language).await {
            Ok(bank) => {
                let mut cache = self.cache.lock().await;
                cache.insert(language, bank.clone());
                Ok(bank)
            }
            // English fallback is served but not cached, so a later call
            // can retry the translation
            Err(()) => Ok(english_questions()),
        }
    }
}
