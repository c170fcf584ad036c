use crate::error::EvalError;
use crate::model::AnalysisCell;

const FIELD_DELIMITER: &str = "||";

/// Parses one `root+suffix||POS FORM||[+]` segment.
///
/// The root loses everything from its first `+`, the part-of-speech is the
/// first character of the tag field and the form is the tag field after the
/// part-of-speech and its separating space.
pub fn parse_analysis_cell(segment: &str) -> Result<AnalysisCell, EvalError> {
    let fields: Vec<&str> = segment.split(FIELD_DELIMITER).collect();
    let [root_field, tag_field, _trailing] = fields.as_slice() else {
        return Err(EvalError::format(fields.len(), segment));
    };
    let (root_field, tag_field) = (*root_field, *tag_field);

    let root = match root_field.find('+') {
        Some(index) => &root_field[..index],
        None => root_field,
    };

    let mut tag_chars = tag_field.chars();
    let Some(postag) = tag_chars.next() else {
        return Err(EvalError::format(fields.len(), segment));
    };
    tag_chars.next();

    Ok(AnalysisCell {
        root: root.to_string(),
        postag: postag.to_string(),
        form: tag_chars.as_str().to_string(),
    })
}
