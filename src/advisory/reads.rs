//! Data Loads
//!
//! The read side of the facade. Loaders feeding list views degrade
//! silently: any failure flips the client offline and substitutes the
//! synthetic collection, and once offline they answer from the dataset
//! without touching the network again. The interactive searches and the
//! admin moderation list report their failures instead.

use std::future::Future;

use crate::api::{
    Answer, ApiError, CropFilter, CropRecommendation, GovernmentScheme, MarketPrice, NewAnswer,
    NewQuestion, PendingExpert, ProductListing, Question, WeatherReport,
};
use crate::validate::Validator;

use super::{AdvisoryClient, AdvisoryError, Fetched};

impl AdvisoryClient {
    /// Shared shape of every degrading loader.
    async fn read_or_fallback<T, Fut>(
        &self,
        context: &'static str,
        attempt: Fut,
        fallback: T,
    ) -> Fetched<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if self.is_mock().await {
            return Fetched::mock(fallback);
        }
        match attempt.await {
            Ok(data) => Fetched::live(data),
            Err(err) => {
                self.degrade(context, &err).await;
                Fetched::mock(fallback)
            }
        }
    }

    /// The five most recent public questions, for the dashboard.
    pub async fn recent_questions(&self) -> Fetched<Vec<Question>> {
        let mut fetched = self.public_questions().await;
        fetched.data.truncate(5);
        fetched
    }

    /// All public questions, for the forum page.
    pub async fn public_questions(&self) -> Fetched<Vec<Question>> {
        self.read_or_fallback(
            "questions",
            self.api().public_questions(),
            self.dataset().questions(),
        )
        .await
    }

    /// Answers posted under one question.
    pub async fn answers_for(&self, question_id: u64) -> Fetched<Vec<Answer>> {
        self.read_or_fallback(
            "answers",
            self.api().answers_for(question_id),
            self.dataset().answers_for(question_id),
        )
        .await
    }

    /// The crop recommendation cards shown on the dashboard.
    pub async fn crop_recommendations(&self) -> Fetched<Vec<CropRecommendation>> {
        self.read_or_fallback("crops", self.api().crops(), self.dataset().recommendations())
            .await
    }

    /// Interactive crop recommendation search. Always live; failures are
    /// reported to the caller rather than papered over with the fixed
    /// dataset, which knows nothing about seasons or soil.
    pub async fn recommend_crops(
        &self,
        filter: &CropFilter,
    ) -> Result<Fetched<Vec<CropRecommendation>>, AdvisoryError> {
        let mut checks = Validator::new();
        checks.required("season", &filter.season);
        checks.required("soilType", &filter.soil_type);
        checks.finish()?;

        let crops = self.api().crop_recommendations(filter).await?;
        Ok(Fetched::live(crops))
    }

    /// Government schemes, for the dashboard and schemes pages.
    pub async fn schemes(&self) -> Fetched<Vec<GovernmentScheme>> {
        self.read_or_fallback("schemes", self.api().public_schemes(), self.dataset().schemes())
            .await
    }

    /// Mandi prices, optionally narrowed to one commodity. The offline
    /// dataset is filtered the same way the backend would.
    pub async fn market_prices(&self, commodity: Option<&str>) -> Fetched<Vec<MarketPrice>> {
        let fallback = match commodity {
            Some(name) => {
                let needle = name.to_lowercase();
                self.dataset()
                    .market_prices()
                    .into_iter()
                    .filter(|p| p.commodity.to_lowercase().contains(&needle))
                    .collect()
            }
            None => self.dataset().market_prices(),
        };
        self.read_or_fallback("market-prices", self.api().market_prices(commodity), fallback)
            .await
    }

    /// Current weather for a city. The offline report is the fixed
    /// snapshot regardless of the requested city.
    pub async fn weather(&self, city: &str) -> Fetched<WeatherReport> {
        self.read_or_fallback("weather", self.api().weather(city), self.dataset().weather())
            .await
    }

    /// Public product listings.
    pub async fn products(&self) -> Fetched<Vec<ProductListing>> {
        self.read_or_fallback(
            "products",
            self.api().public_products(),
            self.dataset().products(),
        )
        .await
    }

    /// Experts awaiting approval, for the admin page.
    pub async fn pending_experts(&self) -> Fetched<Vec<PendingExpert>> {
        self.read_or_fallback(
            "pending-experts",
            self.api().pending_experts(),
            self.dataset().pending_experts(),
        )
        .await
    }

    /// Every question on the platform, for admin moderation. Live only;
    /// the moderation queue must not silently show synthetic content.
    pub async fn all_questions(&self) -> Result<Fetched<Vec<Question>>, AdvisoryError> {
        let questions = self.api().all_questions().await?;
        Ok(Fetched::live(questions))
    }

    /// Post a new question. The title is the first 100 characters of the
    /// content, as the ask dialog does.
    pub async fn ask_question(&self, text: &str) -> Result<(), AdvisoryError> {
        let mut checks = Validator::new();
        checks.required("question", text);
        checks.finish()?;

        let content = text.trim().to_string();
        let question = NewQuestion {
            title: content.chars().take(100).collect(),
            content,
            category: "General".to_string(),
        };
        self.api().create_question(&question).await?;
        Ok(())
    }

    /// Post an answer to a question.
    pub async fn submit_answer(&self, question_id: u64, content: &str) -> Result<(), AdvisoryError> {
        let mut checks = Validator::new();
        checks.required("answer", content);
        checks.finish()?;

        let answer = NewAnswer {
            question_id,
            content: content.trim().to_string(),
        };
        self.api().create_answer(&answer).await?;
        Ok(())
    }
}
