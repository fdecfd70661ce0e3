//! Preference collection: turns a loosely-typed form body into `BlogPreferences`.
//!
//! This is the only place raw strings are interpreted. Every enumerated field is
//! parsed into a closed enum here; later stages never see free-form choices.

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::AppError;

/// A closed set of legal values for one enumerated preference.
///
/// Each value has a stable `slug` (API-facing) and the display `label` the form
/// shows. Parsing accepts either, case-insensitively.
pub trait Choice: Sized + Copy + 'static {
    /// Form field name, used in validation messages.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn slug(self) -> &'static str;
    fn label(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let wanted = normalize_choice(raw);
        Self::ALL.iter().copied().find(|c| {
            normalize_choice(c.slug()) == wanted || normalize_choice(c.label()) == wanted
        })
    }

    fn legal_values() -> String {
        Self::ALL
            .iter()
            .map(|c| c.slug())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lowercases, unifies dashes and collapses whitespace so that
/// "Short (300–500 words)" and "short (300-500  words)" compare equal.
fn normalize_choice(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace(['–', '—'], "-")
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $($variant:ident => ($slug:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn slug(self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.slug())
            }
        }
    };
}

choice_enum! {
    /// How often a GIF is placed, which drives how the draft is segmented.
    GifFrequency, field = "gif_frequency" {
        JustAFew => ("few", "Just a few (2–3 total)"),
        EveryFewParagraphs => ("per-2-3-paragraphs", "Every 2–3 paragraphs"),
        AfterFunnyMoment => ("after-funny-moment", "After every funny moment"),
        BotDecides => ("bot-decides", "Let the bot decide"),
    }
}

impl GifFrequency {
    /// Segment count the policy demands, when it demands one.
    pub fn segment_bounds(self) -> Option<(usize, usize)> {
        match self {
            GifFrequency::JustAFew => Some((2, 3)),
            _ => None,
        }
    }
}

choice_enum! {
    BlogLength, field = "blog_length" {
        Short => ("short", "Short (300–500 words)"),
        Medium => ("medium", "Medium (600–800 words)"),
        Long => ("long", "Long (1000+ words)"),
    }
}

choice_enum! {
    TitleStyle, field = "title_style" {
        Clickbaity => ("clickbaity", "Clickbaity"),
        Punny => ("punny", "Punny"),
        StraightforwardWithTwist => ("straightforward-with-a-twist", "Straightforward with a twist"),
    }
}

choice_enum! {
    EndingStyle, field = "ending_style" {
        WittyLifeLesson => ("witty-life-lesson", "A witty life lesson"),
        FakeSponsoredAd => ("fake-sponsored-ad", "A fake 'sponsored by' ad"),
        MadeUpExpertAdvice => ("made-up-expert-advice", "Made-up expert advice"),
        QuirkyCallToAction => ("quirky-call-to-action", "A quirky call-to-action"),
        EndWithALaugh => ("end-with-a-laugh", "Just end with a laugh"),
    }
}

choice_enum! {
    HumorStyle, field = "humor_styles" {
        Sarcastic => ("sarcastic", "Sarcastic"),
        Satirical => ("satirical", "Satirical"),
        Wholesome => ("wholesome", "Wholesome"),
        Dark => ("dark", "Dark"),
        Slapstick => ("slapstick", "Slapstick / Over-the-top"),
        Deadpan => ("deadpan", "Deadpan / Dry"),
        SelfDeprecating => ("self-deprecating", "Self-deprecating"),
        Wordplay => ("wordplay", "Wordplay / Puns"),
        Random => ("random", "Random / Absurd"),
    }
}

choice_enum! {
    GifType, field = "gif_type" {
        MemeReactions => ("meme-reactions", "Meme reactions"),
        MovieTvClips => ("movie-tv-clips", "Movie/TV clips"),
        AnimalAntics => ("animal-antics", "Animal antics"),
        CartoonSnippets => ("cartoon-snippets", "Cartoon snippets"),
        SurpriseMe => ("surprise-me", "Surprise me!"),
    }
}

/// Raw request body, shaped like the form that posts it.
///
/// Single-select fields left out fall back to the form's first option.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreferencesForm {
    pub topic: String,
    pub narrator: String,
    pub audience: String,
    pub humor_styles: Vec<String>,
    pub gif_type: Vec<String>,
    pub gif_frequency: Option<String>,
    pub blog_length: Option<String>,
    pub sensitive_topics: Option<String>,
    pub funny_incident: Option<String>,
    pub title_style: Option<String>,
    pub ending_style: Option<String>,
}

/// Validated preferences for one generation request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPreferences {
    pub topic: String,
    pub narrator: String,
    pub audience: String,
    /// Selection order is kept; duplicates are dropped.
    pub humor_styles: Vec<HumorStyle>,
    pub gif_type: Vec<GifType>,
    pub gif_frequency: GifFrequency,
    pub blog_length: BlogLength,
    pub sensitive_topics: Option<String>,
    pub funny_incident: Option<String>,
    pub title_style: TitleStyle,
    pub ending_style: EndingStyle,
}

impl BlogPreferences {
    /// Validates and normalizes a submitted form.
    ///
    /// Topic, narrator and audience are forwarded as-is (trimmed) even when
    /// blank. Every unrecognized enumerated value is reported in one error.
    pub fn from_form(form: PreferencesForm) -> Result<Self, AppError> {
        let mut errors = Vec::new();

        let humor_styles = parse_multi::<HumorStyle>(&form.humor_styles, &mut errors);
        let gif_type = parse_multi::<GifType>(&form.gif_type, &mut errors);
        let gif_frequency = parse_single::<GifFrequency>(form.gif_frequency.as_deref(), &mut errors);
        let blog_length = parse_single::<BlogLength>(form.blog_length.as_deref(), &mut errors);
        let title_style = parse_single::<TitleStyle>(form.title_style.as_deref(), &mut errors);
        let ending_style = parse_single::<EndingStyle>(form.ending_style.as_deref(), &mut errors);

        if !errors.is_empty() {
            return Err(AppError::Validation(errors.join("; ")));
        }

        Ok(BlogPreferences {
            topic: form.topic.trim().to_string(),
            narrator: form.narrator.trim().to_string(),
            audience: form.audience.trim().to_string(),
            humor_styles,
            gif_type,
            gif_frequency,
            blog_length,
            sensitive_topics: non_blank(form.sensitive_topics),
            funny_incident: non_blank(form.funny_incident),
            title_style,
            ending_style,
        })
    }

    pub fn humor_styles_text(&self) -> String {
        join_labels(&self.humor_styles)
    }

    pub fn gif_types_text(&self) -> String {
        join_labels(&self.gif_type)
    }
}

fn parse_single<C: Choice>(raw: Option<&str>, errors: &mut Vec<String>) -> C {
    let default = C::ALL[0];
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => default,
        Some(value) => C::parse(value).unwrap_or_else(|| {
            errors.push(format!(
                "{}: unrecognized value '{}' (expected one of: {})",
                C::FIELD,
                value,
                C::legal_values()
            ));
            default
        }),
    }
}

fn parse_multi<C: Choice + PartialEq>(raw: &[String], errors: &mut Vec<String>) -> Vec<C> {
    let mut out: Vec<C> = Vec::new();
    for value in raw.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
        match C::parse(value) {
            Some(choice) if !out.contains(&choice) => out.push(choice),
            Some(_) => {}
            None => errors.push(format!(
                "{}: unrecognized value '{}' (expected any of: {})",
                C::FIELD,
                value,
                C::legal_values()
            )),
        }
    }
    out
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn join_labels<C: Choice>(choices: &[C]) -> String {
    choices
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every legal value of one enumerated preference, for form rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn options_for<C: Choice>() -> Vec<ChoiceOption> {
    C::ALL
        .iter()
        .map(|c| ChoiceOption {
            value: c.slug(),
            label: c.label(),
        })
        .collect()
}
