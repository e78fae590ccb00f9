//! Create a new changelog entry above the nearest header.

use serde::Serialize;
use tracing::{debug, info};

use crate::changelog::{
    find_header_at_or_below, parse_header, plan_placement, render_entry, ChangelogHeader,
    Placement,
};
use crate::document::{Document, Position, TextEdit, TextRange};
use crate::error::EntryError;
use crate::identity::Identity;
use crate::version::bump_version;

/// Inputs for [`plan_new_entry`].
#[derive(Debug, Clone)]
pub struct NewEntryRequest<'a> {
    pub cursor: Position,
    /// Selected text becomes the message and is removed from the document.
    pub selection: Option<TextRange>,
    /// An explicit message. Takes precedence over the selection and the
    /// cursor line, and removes nothing.
    pub message: Option<&'a str>,
    pub identity: &'a Identity,
    /// Trailer date, already formatted.
    pub date: &'a str,
}

/// The outcome of [`plan_new_entry`].
#[derive(Debug, Clone, Serialize)]
pub struct NewEntryPlan {
    /// The header the new entry was derived from.
    pub previous: ChangelogHeader,
    /// Line of that header before the edit.
    pub previous_line: usize,
    pub new_version: String,
    pub message: String,
    /// The rendered entry, without surrounding line breaks.
    pub entry: String,
    pub placement: Placement,
    /// The single edit that removes the message source and inserts the entry.
    pub edit: TextEdit,
    pub cursor: Position,
}

/// Plan a new entry for `document`.
///
/// The message comes from, in order: `request.message`; a non-empty
/// selection; the cursor line when the cursor sits at its end (the line is
/// emptied and its trimmed text used); otherwise an empty message.
pub fn plan_new_entry(
    document: Option<&Document>,
    request: &NewEntryRequest<'_>,
) -> Result<NewEntryPlan, EntryError> {
    let document = document.ok_or(EntryError::NoActiveDocument)?;
    ensure_position(document, request.cursor)?;
    if let Some(selection) = request.selection {
        ensure_position(document, selection.start)?;
        ensure_position(document, selection.end)?;
    }

    let previous_line = find_header_at_or_below(document.lines(), request.cursor.line)
        .ok_or(EntryError::NoChangelogHeaderFound)?;
    let previous = parse_header(&document.lines()[previous_line]);
    let new_version = bump_version(&previous.version)?;

    let (message, removed) = take_message(document, request)?;
    debug!(
        previous_line,
        %new_version,
        message_lines = message.lines().count(),
        "new entry"
    );

    let mut working = document.clone();
    working
        .apply(&[TextEdit::delete(removed)])
        .map_err(|_| out_of_range(removed.start))?;

    let entry = render_entry(
        &previous,
        &new_version,
        &message,
        request.identity,
        request.date,
    );
    let entry_lines = entry.split('\n').count();
    let placement = plan_placement(working.lines(), removed.start, entry_lines, message.is_empty())?;

    // The placement range lives on the line the removal collapsed into;
    // columns past the removal start belong to the removal's end line.
    let end = placement.range.end;
    let pre_edit_end = if end.column >= removed.start.column {
        Position::new(
            removed.end.line,
            end.column - removed.start.column + removed.end.column,
        )
    } else {
        end
    };
    let edit = TextEdit::replace(
        TextRange::new(placement.range.start, pre_edit_end),
        placement.wrap(&entry),
    );

    info!(version = %new_version, line = placement.header_line, "entry planned");
    Ok(NewEntryPlan {
        cursor: placement.cursor,
        previous,
        previous_line,
        new_version,
        message,
        entry,
        placement,
        edit,
    })
}

fn take_message(
    document: &Document,
    request: &NewEntryRequest<'_>,
) -> Result<(String, TextRange), EntryError> {
    let cursor = request.cursor;

    if let Some(message) = request.message {
        return Ok((message.to_string(), TextRange::point(cursor)));
    }

    if let Some(selection) = request.selection.filter(|s| !s.is_empty()) {
        let text = document
            .text_in(selection)
            .map_err(|_| out_of_range(selection.start))?;
        return Ok((text, selection));
    }

    let line = &document.lines()[cursor.line];
    let line_len = line.chars().count();
    if cursor.column == line_len {
        let range = TextRange::new(Position::new(cursor.line, 0), cursor);
        return Ok((line.trim().to_string(), range));
    }

    Ok((String::new(), TextRange::point(cursor)))
}

fn ensure_position(document: &Document, pos: Position) -> Result<(), EntryError> {
    if document.contains(pos) {
        Ok(())
    } else {
        Err(out_of_range(pos))
    }
}

fn out_of_range(pos: Position) -> EntryError {
    EntryError::PositionOutOfRange {
        line: pos.line,
        column: pos.column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "Fri, 05 Jan 2024 08:30:00 +0000";

    fn identity() -> Identity {
        Identity::new("A B", "a@b.com")
    }

    fn request<'a>(identity: &'a Identity, cursor: Position) -> NewEntryRequest<'a> {
        NewEntryRequest {
            cursor,
            selection: None,
            message: None,
            identity,
            date: DATE,
        }
    }

    fn applied(document: &Document, plan: &NewEntryPlan) -> Vec<String> {
        let mut doc = document.clone();
        doc.apply(std::slice::from_ref(&plan.edit)).unwrap();
        doc.lines().to_vec()
    }

    #[test]
    fn test_no_document() {
        let id = identity();
        let err = plan_new_entry(None, &request(&id, Position::new(0, 0))).unwrap_err();
        assert_eq!(err, EntryError::NoActiveDocument);
    }

    #[test]
    fn test_no_header_below_cursor() {
        let doc = Document::from_text("nothing here\n");
        let id = identity();
        let err = plan_new_entry(Some(&doc), &request(&id, Position::new(0, 0))).unwrap_err();
        assert_eq!(err, EntryError::NoChangelogHeaderFound);
    }

    #[test]
    fn test_invalid_version() {
        let doc = Document::from_text("myapp (1.0-1) stable; urgency=low\n");
        let id = identity();
        let err = plan_new_entry(Some(&doc), &request(&id, Position::new(0, 0))).unwrap_err();
        assert!(matches!(err, EntryError::InvalidVersion { .. }));
    }

    #[test]
    fn test_cursor_out_of_range() {
        let doc = Document::from_text("myapp (1.0.0) stable; urgency=low\n");
        let id = identity();
        let err = plan_new_entry(Some(&doc), &request(&id, Position::new(3, 0))).unwrap_err();
        assert_eq!(err, EntryError::PositionOutOfRange { line: 3, column: 0 });
    }

    #[test]
    fn test_empty_message_on_header_line() {
        let doc = Document::from_text("myapp (1.0.0) stable; urgency=low");
        let id = identity();
        let plan = plan_new_entry(Some(&doc), &request(&id, Position::new(0, 0))).unwrap();

        assert_eq!(plan.new_version, "1.0.1");
        assert!(plan.entry.starts_with("myapp (1.0.1) stable; urgency=low"));
        assert_eq!(plan.message, "");
        assert_eq!(plan.cursor, Position::new(4, 6));

        let lines = applied(&doc, &plan);
        assert_eq!(lines[0], "myapp (1.0.1) stable; urgency=low");
        assert_eq!(lines[4], "    - ");
        assert_eq!(lines[6], format!("    -- A B <a@b.com> {}", DATE));
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "myapp (1.0.0) stable; urgency=low");
    }

    #[test]
    fn test_message_from_line_at_cursor_end() {
        let doc = Document::from_text("  fixed the frobnicator\n\nmyapp (2.3) unstable; urgency=low\n");
        let id = identity();
        let plan = plan_new_entry(Some(&doc), &request(&id, Position::new(0, 23))).unwrap();

        assert_eq!(plan.message, "fixed the frobnicator");
        let lines = applied(&doc, &plan);
        assert_eq!(lines[0], "myapp (2.4) unstable; urgency=low");
        assert_eq!(lines[4], "    - fixed the frobnicator");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "myapp (2.3) unstable; urgency=low");
        // line after the entry
        assert_eq!(plan.cursor, Position::new(7, 0));
    }

    #[test]
    fn test_message_from_selection() {
        let doc = Document::from_text("one\ntwo\nthree\n\nmyapp (1.9) stable; urgency=low\n");
        let id = identity();
        let mut req = request(&id, Position::new(0, 0));
        req.selection = Some(TextRange::new(Position::new(0, 0), Position::new(1, 3)));

        let plan = plan_new_entry(Some(&doc), &req).unwrap();
        assert_eq!(plan.message, "one\ntwo");
        assert_eq!(plan.new_version, "1.10");

        let lines = applied(&doc, &plan);
        assert_eq!(lines[0], "myapp (1.10) stable; urgency=low");
        assert_eq!(lines[4], "    - one");
        assert_eq!(lines[5], "    - two");
        assert_eq!(lines[7], "    -- A B <a@b.com> Fri, 05 Jan 2024 08:30:00 +0000");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "three");
    }

    #[test]
    fn test_partial_line_selection_keeps_rest_of_line() {
        let doc = Document::from_text("keep this and that\nmyapp (1) stable; urgency=low\n");
        let id = identity();
        let mut req = request(&id, Position::new(0, 5));
        req.selection = Some(TextRange::new(Position::new(0, 5), Position::new(0, 9)));

        let plan = plan_new_entry(Some(&doc), &req).unwrap();
        assert_eq!(plan.message, "this");

        let lines = applied(&doc, &plan);
        assert_eq!(lines[0], "keep ");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "myapp (2) stable; urgency=low");
        assert_eq!(lines[8], "    -- A B <a@b.com> Fri, 05 Jan 2024 08:30:00 +0000");
        assert_eq!(lines[9], "");
        assert_eq!(lines[10], " and that");
        assert_eq!(lines[11], "myapp (1) stable; urgency=low");
    }

    #[test]
    fn test_explicit_message_wins() {
        let doc = Document::from_text("\nmyapp (1.0.0) stable; urgency=low\n");
        let id = identity();
        let mut req = request(&id, Position::new(0, 0));
        req.message = Some("first\n  second");

        let plan = plan_new_entry(Some(&doc), &req).unwrap();
        let lines = applied(&doc, &plan);
        assert_eq!(lines[4], "    - first");
        assert_eq!(lines[5], "    - second");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "myapp (1.0.0) stable; urgency=low");
    }

    #[test]
    fn test_header_is_found_below_cursor_only() {
        let doc = Document::from_text(
            "myapp (1.0.0) stable; urgency=low\n\nmyapp (0.9.0) stable; urgency=low\n",
        );
        let id = identity();
        let plan = plan_new_entry(Some(&doc), &request(&id, Position::new(1, 0))).unwrap();
        assert_eq!(plan.previous_line, 2);
        assert_eq!(plan.new_version, "0.9.1");
    }
}
