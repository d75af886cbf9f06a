//! Try-on session state: the three user-driven stages and their transitions.
//!
//! The reducer (`TryOnSession::apply`) is pure and can be exercised without a
//! network; the async drivers run a flow and feed its outcome through it.

use crate::{
    error::{Result, VogueError},
    flows::Flows,
    models::{
        AnalyzeClothingImageInput, ClothingAnalysis, CompositeClothingOnModelInput, DataUri,
        GenerateAiModelInput, SuggestedGender,
    },
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DOWNLOAD_FILE_NAME: &str = "virtual-vogue-try-on.png";

#[derive(Debug, Clone, PartialEq)]
pub enum Stage<T> {
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for Stage<T> {
    fn default() -> Self {
        Stage::Idle
    }
}

impl<T> Stage<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Loading => "loading",
            Stage::Succeeded(_) => "succeeded",
            Stage::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Stage::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Stage::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Stage::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// User-facing failure message for one stage. Diagnostic detail goes to the log instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
}

impl Notification {
    const fn destructive(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
        }
    }

    pub const ANALYSIS_FAILED: Notification = Notification::destructive(
        "Analysis Failed",
        "Could not analyze the uploaded image. Please try another one.",
    );
    pub const MODEL_GENERATION_FAILED: Notification = Notification::destructive(
        "Model Generation Failed",
        "Could not generate the AI model. Please try again.",
    );
    pub const TRY_ON_FAILED: Notification = Notification::destructive(
        "Virtual Try-On Failed",
        "Could not create the composite image. Please try again.",
    );
    pub const MISSING_IMAGES: Notification = Notification::destructive(
        "Missing Images",
        "Please upload a clothing item and generate a model first.",
    );
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    UploadStarted(DataUri),
    AnalysisSucceeded(ClothingAnalysis),
    AnalysisFailed(String),
    ModelRequested,
    ModelSucceeded(DataUri),
    ModelFailed(String),
    TryOnRequested,
    TryOnSucceeded(DataUri),
    TryOnFailed(String),
}

/// The composite image, ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct TryOnSession {
    clothing_image: Option<DataUri>,
    analysis: Stage<ClothingAnalysis>,
    model: Stage<DataUri>,
    composite: Stage<DataUri>,
    notifications: Vec<Notification>,
}

impl TryOnSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clothing_image(&self) -> Option<&DataUri> {
        self.clothing_image.as_ref()
    }

    pub fn analysis(&self) -> &Stage<ClothingAnalysis> {
        &self.analysis
    }

    pub fn model(&self) -> &Stage<DataUri> {
        &self.model
    }

    pub fn composite(&self) -> &Stage<DataUri> {
        &self.composite
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_busy(&self) -> bool {
        self.analysis.is_loading() || self.model.is_loading() || self.composite.is_loading()
    }

    pub fn can_try_on(&self) -> bool {
        self.clothing_image.is_some() && self.model.value().is_some()
    }

    /// Applies one transition, returning the notification it raises, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Notification> {
        let notification = match event {
            SessionEvent::UploadStarted(image) => {
                self.clothing_image = Some(image);
                self.analysis = Stage::Loading;
                self.composite = Stage::Idle;
                None
            }
            SessionEvent::AnalysisSucceeded(analysis) => {
                self.analysis = Stage::Succeeded(analysis);
                None
            }
            SessionEvent::AnalysisFailed(message) => {
                self.analysis = Stage::Failed(message);
                self.clothing_image = None;
                Some(Notification::ANALYSIS_FAILED)
            }
            SessionEvent::ModelRequested => {
                self.model = Stage::Loading;
                self.composite = Stage::Idle;
                None
            }
            SessionEvent::ModelSucceeded(image) => {
                self.model = Stage::Succeeded(image);
                None
            }
            SessionEvent::ModelFailed(message) => {
                self.model = Stage::Failed(message);
                Some(Notification::MODEL_GENERATION_FAILED)
            }
            SessionEvent::TryOnRequested => {
                self.composite = Stage::Loading;
                None
            }
            SessionEvent::TryOnSucceeded(image) => {
                self.composite = Stage::Succeeded(image);
                None
            }
            SessionEvent::TryOnFailed(message) => {
                self.composite = Stage::Failed(message);
                Some(Notification::TRY_ON_FAILED)
            }
        };

        if let Some(notification) = &notification {
            self.notifications.push(notification.clone());
        }
        notification
    }

    pub async fn upload_clothing(
        &mut self,
        flows: &Flows,
        photo: DataUri,
    ) -> Result<ClothingAnalysis> {
        let input = AnalyzeClothingImageInput::new(photo.to_string());
        self.apply(SessionEvent::UploadStarted(photo));

        match flows.analyze_clothing_image(input).await {
            Ok(analysis) => {
                self.apply(SessionEvent::AnalysisSucceeded(analysis.clone()));
                Ok(analysis)
            }
            Err(e) => {
                log::error!("Error analyzing image: {}", e);
                self.apply(SessionEvent::AnalysisFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn generate_model(&mut self, flows: &Flows, form: &ModelForm) -> Result<DataUri> {
        self.apply(SessionEvent::ModelRequested);

        let input = GenerateAiModelInput::new(form.description());
        match flows.generate_ai_model(input).await {
            Ok(output) => {
                self.apply(SessionEvent::ModelSucceeded(output.model_image.clone()));
                Ok(output.model_image)
            }
            Err(e) => {
                log::error!("Error generating model: {}", e);
                self.apply(SessionEvent::ModelFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn create_try_on(&mut self, flows: &Flows) -> Result<DataUri> {
        let (Some(clothing), Some(model)) = (self.clothing_image.clone(), self.model.value().cloned())
        else {
            self.notifications.push(Notification::MISSING_IMAGES);
            return Err(VogueError::Validation(
                "a clothing image and a generated model are both required".into(),
            ));
        };

        self.apply(SessionEvent::TryOnRequested);

        let input = CompositeClothingOnModelInput::new(clothing.to_string(), model.to_string());
        match flows.composite_clothing_on_model(input).await {
            Ok(output) => {
                self.apply(SessionEvent::TryOnSucceeded(output.composite_image.clone()));
                Ok(output.composite_image)
            }
            Err(e) => {
                log::error!("Error creating try-on: {}", e);
                self.apply(SessionEvent::TryOnFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn download(&self) -> Result<Download> {
        let image = self.composite.value().ok_or_else(|| {
            VogueError::Validation("no try-on image is available to download".into())
        })?;

        Ok(Download {
            file_name: DOWNLOAD_FILE_NAME,
            mime_type: image.essence().to_string(),
            bytes: image.decode()?,
        })
    }
}

/// Declares a fixed option set: value text, short key and display label per option.
macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident, $what:literal, default = $default:ident, {
        $($variant:ident => ($value:literal, $key:literal, $label:literal)),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl FromStr for $name {
            type Err = VogueError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                if wanted.is_empty() {
                    return Err(VogueError::Validation(concat!("Please select a ", $what, ".").into()));
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| {
                        option.value().eq_ignore_ascii_case(wanted)
                            || option.key().eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| {
                        let keys: Vec<&str> = Self::ALL.iter().map(|o| o.key()).collect();
                        VogueError::Validation(format!(
                            "unknown {} '{}', expected one of: {}",
                            $what,
                            wanted,
                            keys.join(", ")
                        ))
                    })
            }
        }
    };
}

option_set!(Pose, "pose", default = Confident, {
    Confident => ("standing confidently, hands on hips", "confident", "Confident Stance"),
    Walking => ("walking forward, smiling", "walking", "Walking Pose"),
    CasualLean => ("leaning against a wall, casual", "casual-lean", "Casual Lean"),
});

option_set!(SkinTone, "skin tone", default = LightBrown, {
    LightBrown => ("light brown skin", "light-brown", "Light Brown"),
    DarkChocolate => ("dark chocolate skin", "dark-chocolate", "Dark Chocolate"),
    PaleIvory => ("pale ivory skin", "pale-ivory", "Pale Ivory"),
    Olive => ("olive skin", "olive", "Olive"),
});

option_set!(BodyType, "body type", default = Athletic, {
    Athletic => ("athletic build", "athletic", "Athletic"),
    Average => ("average build", "average", "Average"),
    Hourglass => ("hourglass figure", "hourglass", "Hourglass"),
});

option_set!(ModelGender, "model gender", default = Female, {
    Female => ("female", "female", "Female"),
    Male => ("male", "male", "Male"),
});

/// The model-parameter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelForm {
    pub pose: Pose,
    pub body_type: BodyType,
    pub skin_tone: SkinTone,
    pub gender: ModelGender,
}

impl ModelForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form from raw field values, as submitted by a user.
    pub fn parse(pose: &str, body_type: &str, skin_tone: &str, gender: &str) -> Result<Self> {
        Ok(Self {
            pose: pose.parse()?,
            body_type: body_type.parse()?,
            skin_tone: skin_tone.parse()?,
            gender: gender.parse()?,
        })
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    pub fn with_skin_tone(mut self, skin_tone: SkinTone) -> Self {
        self.skin_tone = skin_tone;
        self
    }

    pub fn with_gender(mut self, gender: ModelGender) -> Self {
        self.gender = gender;
        self
    }

    /// Adopts the analysis' gender suggestion; unisex garments keep the current choice.
    pub fn suggest_from(mut self, analysis: &ClothingAnalysis) -> Self {
        match analysis.suggested_gender {
            SuggestedGender::Male => self.gender = ModelGender::Male,
            SuggestedGender::Female => self.gender = ModelGender::Female,
            SuggestedGender::Unisex => {}
        }
        self
    }

    pub fn description(&self) -> String {
        format!(
            "A full-body studio portrait of a {} model with {} and an {}. The model is {}. The background is plain white.",
            self.gender, self.skin_tone, self.body_type, self.pose
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(payload: &str) -> DataUri {
        DataUri::new("image/png", payload).unwrap()
    }

    fn analysis(gender: SuggestedGender) -> ClothingAnalysis {
        ClothingAnalysis {
            garment_type: "dress".into(),
            clothing_features: vec!["red".into()],
            suggested_gender: gender,
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = TryOnSession::new();
        assert_eq!(session.analysis().name(), "idle");
        assert_eq!(session.model().name(), "idle");
        assert_eq!(session.composite().name(), "idle");
        assert!(!session.is_busy());
        assert!(!session.can_try_on());
        assert!(session.download().is_err());
    }

    #[test]
    fn test_analysis_failure_clears_clothing_image() {
        let mut session = TryOnSession::new();
        session.apply(SessionEvent::UploadStarted(image("Y2xvdGg=")));
        assert!(session.analysis().is_loading());
        assert!(session.clothing_image().is_some());

        let notification = session.apply(SessionEvent::AnalysisFailed("boom".into()));
        assert_eq!(notification, Some(Notification::ANALYSIS_FAILED));
        assert_eq!(session.analysis().error(), Some("boom"));
        assert!(session.clothing_image().is_none());
        assert_eq!(session.notifications(), &[Notification::ANALYSIS_FAILED]);
    }

    #[test]
    fn test_new_upload_and_model_request_reset_composite() {
        let mut session = TryOnSession::new();
        session.apply(SessionEvent::UploadStarted(image("Y2xvdGg=")));
        session.apply(SessionEvent::AnalysisSucceeded(analysis(SuggestedGender::Female)));
        session.apply(SessionEvent::ModelSucceeded(image("bW9kZWw=")));
        assert!(session.can_try_on());
        session.apply(SessionEvent::TryOnSucceeded(image("Y29tcG9zaXRl")));
        assert!(session.composite().value().is_some());

        session.apply(SessionEvent::ModelRequested);
        assert_eq!(session.composite(), &Stage::Idle);
        assert!(session.model().is_loading());
        assert!(!session.can_try_on());

        session.apply(SessionEvent::ModelSucceeded(image("bW9kZWw=")));
        session.apply(SessionEvent::TryOnSucceeded(image("Y29tcG9zaXRl")));
        session.apply(SessionEvent::UploadStarted(image("c2hpcnQ=")));
        assert_eq!(session.composite(), &Stage::Idle);
    }

    #[test]
    fn test_failed_stages_raise_stage_notifications() {
        let mut session = TryOnSession::new();
        assert_eq!(
            session.apply(SessionEvent::ModelFailed("x".into())),
            Some(Notification::MODEL_GENERATION_FAILED)
        );
        assert_eq!(
            session.apply(SessionEvent::TryOnFailed("y".into())),
            Some(Notification::TRY_ON_FAILED)
        );
        assert_eq!(Notification::TRY_ON_FAILED.title, "Virtual Try-On Failed");
    }

    #[test]
    fn test_download_decodes_composite() {
        let mut session = TryOnSession::new();
        session.apply(SessionEvent::TryOnSucceeded(image("aGVsbG8=")));
        let download = session.download().unwrap();
        assert_eq!(download.file_name, "virtual-vogue-try-on.png");
        assert_eq!(download.mime_type, "image/png");
        assert_eq!(download.bytes, b"hello");
    }

    #[test]
    fn test_default_form_description() {
        let form = ModelForm::new().with_skin_tone(SkinTone::Olive);
        assert_eq!(
            form.description(),
            "A full-body studio portrait of a female model with olive skin and an athletic build. The model is standing confidently, hands on hips. The background is plain white."
        );
    }

    #[test]
    fn test_form_parse_accepts_values_and_keys() {
        let form = ModelForm::parse(
            "walking forward, smiling",
            "hourglass",
            "Dark-Chocolate",
            "male",
        )
        .unwrap();
        assert_eq!(form.pose, Pose::Walking);
        assert_eq!(form.body_type, BodyType::Hourglass);
        assert_eq!(form.skin_tone, SkinTone::DarkChocolate);
        assert_eq!(form.gender, ModelGender::Male);
    }

    #[test]
    fn test_form_parse_rejects_empty_and_unknown() {
        let err = ModelForm::parse("", "athletic", "olive", "female").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Please select a pose.");

        let err = ModelForm::parse("confident", "athletic", "green", "female").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("olive"));
    }

    #[test]
    fn test_suggest_from_analysis() {
        let form = ModelForm::new().suggest_from(&analysis(SuggestedGender::Male));
        assert_eq!(form.gender, ModelGender::Male);

        let form = ModelForm::new()
            .with_gender(ModelGender::Male)
            .suggest_from(&analysis(SuggestedGender::Unisex));
        assert_eq!(form.gender, ModelGender::Male);
    }

    #[test]
    fn test_option_sets() {
        assert_eq!(Pose::ALL.len(), 3);
        assert_eq!(SkinTone::ALL.len(), 4);
        assert_eq!(Pose::default().label(), "Confident Stance");
        assert_eq!(SkinTone::default().value(), "light brown skin");
    }
}
