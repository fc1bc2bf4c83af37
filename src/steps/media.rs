use crate::domain::{Draft, MediaRef, StepFragment};
use crate::wizard::WizardStep;

use super::form::is_blank;
use super::{sanitize_note, FieldErrors, StepForm};

/// Gallery of the container itself; unit images are handled by the unit
/// builder.
pub struct MediaForm;

impl StepForm for MediaForm {
    const STEP: WizardStep = WizardStep::MediaGallery;
    type Value = Vec<MediaRef>;

    fn initial(draft: &Draft) -> Self::Value {
        draft.media.clone()
    }

    fn validate(value: &Self::Value) -> FieldErrors {
        validate_gallery("media", value)
    }

    fn into_fragment(value: Self::Value) -> StepFragment {
        StepFragment::Media(normalize_gallery(value))
    }
}

pub(crate) fn validate_gallery(prefix: &str, media: &[MediaRef]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (index, item) in media.iter().enumerate() {
        if is_blank(&item.url) {
            errors.add(format!("{prefix}[{index}].url"), "Image URL is required");
        }
    }
    if media.iter().filter(|item| item.is_cover).count() > 1 {
        errors.add(prefix, "Only one image can be the cover");
    }
    errors
}

pub(crate) fn normalize_gallery(media: Vec<MediaRef>) -> Vec<MediaRef> {
    media
        .into_iter()
        .map(|item| MediaRef {
            url: item.url.trim().to_string(),
            caption: sanitize_note(item.caption.as_deref()),
            is_cover: item.is_cover,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_covers_are_rejected() {
        let gallery = vec![MediaRef::cover("a.jpg"), MediaRef::cover("b.jpg")];
        let errors = MediaForm::validate(&gallery);
        assert!(errors.contains("media"));
    }

    #[test]
    fn blank_url_is_reported_by_position() {
        let gallery = vec![MediaRef::new("a.jpg"), MediaRef::new(" ")];
        let errors = MediaForm::validate(&gallery);
        assert!(errors.contains("media[1].url"));
    }
}
