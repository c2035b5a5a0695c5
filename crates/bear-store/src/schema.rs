//! Table layout of the Bear 2 Core Data store and the queries run against it.
//!
//! The schema is undocumented and owned by Bear; only the columns listed here
//! are relied on.

/// Notes table.
pub const NOTE_TABLE: &str = "ZSFNOTE";
/// Tags table.
pub const TAG_TABLE: &str = "ZSFNOTETAG";
/// Note-to-tag join table.
pub const NOTE_TAG_JOIN_TABLE: &str = "Z_5TAGS";
/// Note-to-note link table.
pub const BACKLINK_TABLE: &str = "ZSFNOTEBACKLINK";

/// Expands to a `SELECT` of the note columns read by the row mapper, in the
/// order [`crate::mapper::RawNoteRow::from_row`] expects, followed by `$tail`.
macro_rules! select_notes {
    ($tail:literal) => {
        concat!(
            "SELECT n.Z_PK, n.ZTITLE, n.ZTEXT, n.ZUNIQUEIDENTIFIER, ",
            "n.ZCREATIONDATE, n.ZMODIFICATIONDATE, ",
            "n.ZTRASHED, n.ZARCHIVED, n.ZPINNED ",
            "FROM ZSFNOTE n ",
            $tail
        )
    };
}

/// Case-insensitive substring match on title or body. `?1` is a `LIKE`
/// pattern escaped with `\`, `?2` the limit.
pub(crate) const SEARCH_NOTES: &str = select_notes!(
    "WHERE (n.ZTITLE LIKE ?1 ESCAPE '\\' OR n.ZTEXT LIKE ?1 ESCAPE '\\') \
     AND COALESCE(n.ZTRASHED, 0) = 0 \
     AND COALESCE(n.ZPERMANENTLYDELETED, 0) = 0 \
     ORDER BY n.ZMODIFICATIONDATE DESC \
     LIMIT ?2"
);

/// Single note by identifier or title; identifier matches sort first.
pub(crate) const GET_NOTE: &str = select_notes!(
    "WHERE (n.ZUNIQUEIDENTIFIER = ?1 OR n.ZTITLE = ?1) \
     AND COALESCE(n.ZTRASHED, 0) = 0 \
     AND COALESCE(n.ZPERMANENTLYDELETED, 0) = 0 \
     ORDER BY CASE WHEN n.ZUNIQUEIDENTIFIER = ?1 THEN 0 ELSE 1 END, \
     n.ZMODIFICATIONDATE DESC \
     LIMIT 1"
);

/// Notes carrying the tag titled `?1`.
pub(crate) const GET_NOTES_BY_TAG: &str = select_notes!(
    "JOIN Z_5TAGS nt ON nt.Z_5NOTES = n.Z_PK \
     JOIN ZSFNOTETAG t ON t.Z_PK = nt.Z_13TAGS \
     WHERE t.ZTITLE = ?1 \
     AND COALESCE(n.ZTRASHED, 0) = 0 \
     AND COALESCE(n.ZPERMANENTLYDELETED, 0) = 0 \
     ORDER BY n.ZMODIFICATIONDATE DESC \
     LIMIT ?2"
);

/// Notes modified after the store-native cutoff `?1`.
pub(crate) const GET_RECENT_NOTES: &str = select_notes!(
    "WHERE n.ZMODIFICATIONDATE > ?1 \
     AND COALESCE(n.ZTRASHED, 0) = 0 \
     AND COALESCE(n.ZPERMANENTLYDELETED, 0) = 0 \
     ORDER BY n.ZMODIFICATIONDATE DESC \
     LIMIT ?2"
);

/// Tags with a title, alphabetical.
pub(crate) const LIST_TAGS: &str = "SELECT ZTITLE, ZUNIQUEIDENTIFIER FROM ZSFNOTETAG \
     WHERE ZTITLE IS NOT NULL \
     ORDER BY ZTITLE COLLATE NOCASE, ZTITLE";

/// Row key of a note by identifier or title. Trashed notes still resolve so
/// links into the trash are reported; permanently deleted ones do not.
pub(crate) const GET_NOTE_PK: &str = "SELECT Z_PK FROM ZSFNOTE \
     WHERE (ZUNIQUEIDENTIFIER = ?1 OR ZTITLE = ?1) \
     AND COALESCE(ZPERMANENTLYDELETED, 0) = 0 \
     ORDER BY CASE WHEN ZUNIQUEIDENTIFIER = ?1 THEN 0 ELSE 1 END, \
     ZMODIFICATIONDATE DESC \
     LIMIT 1";

/// Live notes that link to the note with row key `?1`.
pub(crate) const GET_BACKLINKS: &str = select_notes!(
    "WHERE n.Z_PK IN (SELECT b.ZLINKEDBY FROM ZSFNOTEBACKLINK b WHERE b.ZLINKINGTO = ?1) \
     AND COALESCE(n.ZTRASHED, 0) = 0 \
     AND COALESCE(n.ZPERMANENTLYDELETED, 0) = 0 \
     ORDER BY n.ZMODIFICATIONDATE DESC"
);

/// Escape `LIKE` wildcards and wrap the term for substring matching.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
