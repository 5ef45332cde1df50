//! Outline domain library: a document is a flat run of indented lines.
//! Modules keep the core pure (folds, trees, reorders are derived values) and route every
//! mutation through the single write path in `session`, which owns the undo history.

pub mod core {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use serde_with::skip_serializing_none;
    use std::collections::HashSet;
    use std::fmt;

    /// Schema version stamped on documents created by this crate. Interpreted only by
    /// external migrators.
    pub const CURRENT_SCHEMA_VERSION: u32 = 1;

    /* ------------------------------- IDs ------------------------------- */

    /// Stable identity of a line: its creation timestamp. Array position is never identity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LineId(pub DateTime<Utc>);

    /* ---------------------------- Value Objects ---------------------------- */

    /// Inline tag such as `#work`; the leading `#` is kept.
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Tag(pub String);

    impl From<&str> for Tag {
        fn from(s: &str) -> Self {
            Self(s.to_string())
        }
    }

    impl fmt::Display for Tag {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Free-form color label attached by the UI.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Color(pub String);

    impl From<&str> for Color {
        fn from(s: &str) -> Self {
            Self(s.to_string())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TaskStatus {
        #[default]
        Unset,
        Incomplete,
        Complete,
    }

    impl TaskStatus {
        /// Next status in the checkbox cycle: unset -> incomplete -> complete -> unset.
        pub fn cycle(self) -> Self {
            match self {
                TaskStatus::Unset => TaskStatus::Incomplete,
                TaskStatus::Incomplete => TaskStatus::Complete,
                TaskStatus::Complete => TaskStatus::Unset,
            }
        }

        pub fn is_unset(&self) -> bool {
            matches!(self, TaskStatus::Unset)
        }
    }

    /* ------------------------------ Entities ------------------------------ */

    /// The atomic unit of a document.
    #[skip_serializing_none]
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Line {
        /// Raw markdown-like text.
        pub content: String,

        /// Nesting depth. Consecutive lines may skip levels.
        #[serde(default)]
        pub indent: u32,

        /// Assigned once; doubles as the line's identity.
        pub created_at: DateTime<Utc>,

        /// Refreshed on content or attribute mutation.
        pub updated_at: DateTime<Utc>,

        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        pub folded: bool,

        #[serde(default, skip_serializing_if = "TaskStatus::is_unset")]
        pub task: TaskStatus,

        /// Accumulated timer value in seconds.
        pub elapsed_seconds: Option<u64>,

        pub pinned_at: Option<DateTime<Utc>>,

        pub color: Option<Color>,
    }

    impl Line {
        pub fn new(content: impl Into<String>, indent: u32, created_at: DateTime<Utc>) -> Self {
            Self {
                content: content.into(),
                indent,
                created_at,
                updated_at: created_at,
                folded: false,
                task: TaskStatus::Unset,
                elapsed_seconds: None,
                pinned_at: None,
                color: None,
            }
        }

        pub fn id(&self) -> LineId {
            LineId(self.created_at)
        }

        pub fn with_folded(mut self, folded: bool) -> Self {
            self.folded = folded;
            self
        }

        pub fn with_task(mut self, task: TaskStatus) -> Self {
            self.task = task;
            self
        }

        pub fn with_elapsed(mut self, seconds: u64) -> Self {
            self.elapsed_seconds = Some(seconds);
            self
        }

        pub fn with_color(mut self, color: Color) -> Self {
            self.color = Some(color);
            self
        }

        /// Mark the line as modified at `now`.
        pub fn touch(&mut self, now: DateTime<Utc>) {
            self.updated_at = now;
        }

        pub fn is_pinned(&self) -> bool {
            self.pinned_at.is_some()
        }

        /// Tags written in this line's own content.
        pub fn own_tags(&self) -> Vec<Tag> {
            extract_tags(&self.content)
        }
    }

    /* ------------------------------ Aggregate ------------------------------ */

    /// Aggregate root: the ordered line sequence. Order is the only hierarchy there is.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Document {
        pub schema_version: u32,
        #[serde(default)]
        pub children: Vec<Line>,
    }

    impl Default for Document {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Document {
        pub fn new() -> Self {
            Self {
                schema_version: CURRENT_SCHEMA_VERSION,
                children: vec![],
            }
        }

        pub fn with_lines(children: Vec<Line>) -> Self {
            Self {
                schema_version: CURRENT_SCHEMA_VERSION,
                children,
            }
        }

        pub fn line_count(&self) -> usize {
            self.children.len()
        }

        pub fn is_empty(&self) -> bool {
            self.children.is_empty()
        }

        pub fn line(&self, index: usize) -> Option<&Line> {
            self.children.get(index)
        }

        /// Current position of the line with the given identity.
        pub fn index_of(&self, id: LineId) -> Option<usize> {
            self.children.iter().position(|line| line.id() == id)
        }

        /// Reject documents where two lines share an identity.
        pub fn validate(&self) -> Result<(), OutlineError> {
            let mut seen = HashSet::with_capacity(self.children.len());
            for line in &self.children {
                if !seen.insert(line.id()) {
                    return Err(OutlineError::DuplicateIdentity(line.id()));
                }
            }
            Ok(())
        }

        /// Latest creation timestamp in the document, if any.
        pub fn newest_identity(&self) -> Option<LineId> {
            self.children.iter().map(Line::id).max()
        }
    }

    /* ---------------------------- Errors (domain) ---------------------------- */

    /// Caller contract violations. Operations that simply change nothing report a no-op
    /// instead of an error.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum OutlineError {
        #[error("line index {index} is out of range for a document of {len} lines")]
        IndexOutOfRange { index: usize, len: usize },
        #[error("line index {0} is selected more than once")]
        DuplicateIndex(usize),
        #[error("line identity {0:?} appears more than once")]
        DuplicateIdentity(LineId),
        #[error("a document must keep at least one line")]
        LastLine,
        #[error("shifting line {index} would push its indent past {}", u32::MAX)]
        IndentOverflow { index: usize },
        #[error("no line identity is left after {0:?}")]
        IdentityExhausted(LineId),
    }

    pub fn check_index(index: usize, len: usize) -> Result<(), OutlineError> {
        if index < len {
            Ok(())
        } else {
            Err(OutlineError::IndexOutOfRange { index, len })
        }
    }

    /// Range-check every index and reject repeats.
    pub fn check_selection(indices: &[usize], len: usize) -> Result<(), OutlineError> {
        let mut seen = HashSet::with_capacity(indices.len());
        for &index in indices {
            check_index(index, len)?;
            if !seen.insert(index) {
                return Err(OutlineError::DuplicateIndex(index));
            }
        }
        Ok(())
    }

    /* ----------------------------- Tag extraction ----------------------------- */

    fn is_tag_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    fn tag_token(i: &str) -> nom::IResult<&str, &str> {
        use nom::{
            bytes::complete::take_while1, character::complete::char, combinator::recognize,
            sequence::preceded,
        };
        recognize(preceded(char('#'), take_while1(is_tag_char)))(i)
    }

    /// Every `#word` run in `content`, in order of appearance. Repeats are kept.
    pub fn extract_tags(content: &str) -> Vec<Tag> {
        let mut tags = Vec::new();
        let mut rest = content;
        while !rest.is_empty() {
            match tag_token(rest) {
                Ok((r, token)) => {
                    tags.push(Tag::from(token));
                    rest = r;
                }
                Err(_) => {
                    let mut chars = rest.chars();
                    chars.next();
                    rest = chars.as_str();
                }
            }
        }
        tags
    }

}


pub mod fold {
    //! Fold (collapse) engine. Display state is derived from each line's own `folded` flag
    //! and the indents around it; nothing about folds is stored beyond that flag.

    use crate::core::Line;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum FoldState {
        Uncollapsed,
        /// The line itself carries `folded = true`; it stays visible.
        CollapseStart,
        /// Inside an active fold region; hidden from view.
        Collapsed,
    }

    impl FoldState {
        pub fn is_hidden(self) -> bool {
            matches!(self, FoldState::Collapsed)
        }
    }

    /// One state per line, single pass.
    ///
    /// A folded line always opens a new region at its own indent, even when it sits inside
    /// another region, so nested folds coexist and each ends at the first line at or above
    /// its own threshold.
    pub fn compute_fold_states(lines: &[Line]) -> Vec<FoldState> {
        let mut out = Vec::with_capacity(lines.len());
        let mut active_fold_indent: Option<u32> = None;

        for line in lines {
            if active_fold_indent.is_some_and(|active| line.indent <= active) {
                active_fold_indent = None;
            }

            let state = if line.folded {
                active_fold_indent = Some(line.indent);
                FoldState::CollapseStart
            } else if active_fold_indent.is_some_and(|active| line.indent > active) {
                FoldState::Collapsed
            } else {
                FoldState::Uncollapsed
            };
            out.push(state);
        }
        out
    }

    /// Exclusive end of the descendant run that follows `index`.
    pub fn subtree_end(lines: &[Line], index: usize) -> usize {
        let Some(root) = lines.get(index) else {
            return index.min(lines.len());
        };
        lines[index + 1..]
            .iter()
            .position(|line| line.indent <= root.indent)
            .map_or(lines.len(), |offset| index + 1 + offset)
    }

    pub fn has_children(lines: &[Line], index: usize) -> bool {
        subtree_end(lines, index) > index + 1
    }

    /// Indices a renderer should draw.
    pub fn visible_indices(states: &[FoldState]) -> Vec<usize> {
        states
            .iter()
            .enumerate()
            .filter(|(_, state)| !state.is_hidden())
            .map(|(i, _)| i)
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::FoldState::{Collapsed as C, CollapseStart as S, Uncollapsed as U};
        use super::*;
        use crate::test_support::{at, lines};

        fn fold(mut ls: Vec<Line>, folded: &[usize]) -> Vec<Line> {
            for &i in folded {
                ls[i].folded = true;
            }
            ls
        }

        #[test]
        fn folded_parent_hides_child() {
            let ls = fold(lines(&[("A", 0), ("B", 1), ("C", 2)]), &[1]);
            assert_eq!(compute_fold_states(&ls), vec![U, S, C]);
        }

        #[test]
        fn sibling_ends_region() {
            let ls = fold(
                lines(&[("A", 0), ("a1", 1), ("a2", 2), ("B", 0), ("b1", 1)]),
                &[0],
            );
            assert_eq!(compute_fold_states(&ls), vec![S, C, C, U, U]);
        }

        #[test]
        fn nested_fold_replaces_threshold() {
            // B takes over the threshold; C and x both sit deeper than B.
            let ls = fold(
                lines(&[("A", 0), ("B", 1), ("C", 3), ("x", 2), ("D", 0)]),
                &[0, 1],
            );
            assert_eq!(compute_fold_states(&ls), vec![S, S, C, C, U]);

            // Once B's region ends the outer region is not resumed.
            let ls = fold(lines(&[("A", 0), ("B", 1), ("C", 2), ("y", 1)]), &[0, 1]);
            assert_eq!(compute_fold_states(&ls), vec![S, S, C, U]);
        }

        #[test]
        fn folded_leaf_hides_nothing() {
            let ls = fold(lines(&[("A", 0), ("B", 0)]), &[0]);
            assert_eq!(compute_fold_states(&ls), vec![S, U]);
            assert!(compute_fold_states(&[]).is_empty());
        }

        #[test]
        fn skipped_levels_stay_inside_region() {
            let ls = fold(lines(&[("A", 0), ("deep", 4), ("B", 0)]), &[0]);
            assert_eq!(compute_fold_states(&ls), vec![S, C, U]);
        }

        /// Every indent sequence of length 5 over 0..3 with every fold pattern.
        fn all_small_documents() -> impl Iterator<Item = Vec<Line>> {
            (0..3u32.pow(5)).flat_map(|code| {
                (0..1u32 << 5).map(move |mask| {
                    let mut c = code;
                    (0..5)
                        .map(|i| {
                            let indent = c % 3;
                            c /= 3;
                            Line::new(format!("l{i}"), indent, at(i as i64))
                                .with_folded(mask & (1 << i) != 0)
                        })
                        .collect::<Vec<Line>>()
                })
            })
        }

        #[test]
        fn fold_states_are_idempotent_and_contained() {
            for ls in all_small_documents() {
                let states = compute_fold_states(&ls);
                assert_eq!(states, compute_fold_states(&ls));
                assert_eq!(states.len(), ls.len());

                for (i, state) in states.iter().enumerate() {
                    if *state != C {
                        continue;
                    }
                    let opener = (0..i).rev().find(|&j| {
                        states[j] == S
                            && ls[j].indent < ls[i].indent
                            && (j + 1..i).all(|k| ls[k].indent > ls[j].indent)
                    });
                    assert!(opener.is_some(), "line {i} collapsed without opener: {ls:?}");
                }
            }
        }

        #[test]
        fn subtree_helpers() {
            let ls = lines(&[("A", 0), ("a", 1), ("b", 3), ("B", 0), ("C", 1)]);
            assert_eq!(subtree_end(&ls, 0), 3);
            assert_eq!(subtree_end(&ls, 1), 3);
            assert_eq!(subtree_end(&ls, 3), 5);
            assert_eq!(subtree_end(&ls, 4), 5);
            assert_eq!(subtree_end(&ls, 9), 5);
            assert!(has_children(&ls, 0));
            assert!(!has_children(&ls, 2));
        }

        #[test]
        fn visible_skips_collapsed() {
            assert_eq!(visible_indices(&[U, S, C, C, U]), vec![0, 1, 4]);
        }
    }
}

pub mod hierarchy {
    //! Explicit tree view over the flat line array, with inherited tags.
    //!
    //! The tree is a read model: built in one pass, never persisted, and children are owned
    //! by their parent (no back pointers).

    use crate::core::{Document, Line, Tag, TaskStatus, extract_tags};
    use indexmap::IndexMap;
    use serde::Serialize;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TreeNode {
        #[serde(flatten)]
        pub line: Line,
        pub children: Vec<TreeNode>,
        /// Own tags followed by every ancestor's, nearest ancestor first.
        pub tags: Vec<Tag>,
        /// Position of the line in the source document.
        pub original_index: usize,
    }

    impl TreeNode {
        fn walk_depth<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a TreeNode, usize)) {
            f(self, depth);
            for child in &self.children {
                child.walk_depth(depth + 1, f);
            }
        }

        pub fn has_tag(&self, tag: &Tag) -> bool {
            self.tags.contains(tag)
        }
    }

    /// Root-like container; its children are the top-level nodes.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
    pub struct OutlineTree {
        pub children: Vec<TreeNode>,
    }

    impl OutlineTree {
        /// Pre-order visit with the node's depth in the tree (top level is 0).
        pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a TreeNode, usize)) {
            for node in &self.children {
                node.walk_depth(0, &mut f);
            }
        }

        pub fn node_count(&self) -> usize {
            let mut n = 0;
            self.walk(|_, _| n += 1);
            n
        }

        /// Nodes carrying `tag` directly or through an ancestor, in document order.
        pub fn lines_tagged(&self, tag: &Tag) -> Vec<&TreeNode> {
            let mut out = Vec::new();
            self.walk(|node, _| {
                if node.has_tag(tag) {
                    out.push(node);
                }
            });
            out
        }
    }

    /// Stack-builds the tree. The stack holds the currently open ancestors and its length is
    /// compared against each line's indent, so skipped levels (0 -> 2) need no special case.
    pub fn build_tree(document: &Document) -> OutlineTree {
        let mut roots: Vec<TreeNode> = Vec::new();
        let mut stack: Vec<TreeNode> = Vec::new();

        for (index, line) in document.children.iter().enumerate() {
            let depth = line.indent as usize;
            while stack.len() > depth {
                close_top(&mut stack, &mut roots);
            }

            let mut tags = extract_tags(&line.content);
            if let Some(parent) = stack.last() {
                tags.extend(parent.tags.iter().cloned());
            }

            stack.push(TreeNode {
                line: line.clone(),
                children: vec![],
                tags,
                original_index: index,
            });
        }

        while !stack.is_empty() {
            close_top(&mut stack, &mut roots);
        }

        OutlineTree { children: roots }
    }

    // Attach the popped node to its parent (or to the roots).
    fn close_top(stack: &mut Vec<TreeNode>, roots: &mut Vec<TreeNode>) {
        if let Some(node) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => roots.push(node),
            }
        }
    }

    /* --------------------------- Tag statistics --------------------------- */

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagStats {
        /// Lines carrying the tag, own or inherited.
        pub lines: usize,
        /// Lines whose own content declares the tag.
        pub declared: usize,
        pub complete: usize,
        pub incomplete: usize,
        /// Timer total over the carrying lines.
        pub elapsed_seconds: u64,
    }

    /// Aggregate per-tag counters, keyed in order of first appearance.
    /// A line counts once per tag even if the tag repeats along its chain.
    pub fn tag_statistics(tree: &OutlineTree) -> IndexMap<Tag, TagStats> {
        let mut out: IndexMap<Tag, TagStats> = IndexMap::new();
        tree.walk(|node, _| {
            let own: HashSet<Tag> = extract_tags(&node.line.content).into_iter().collect();
            let mut seen = HashSet::new();
            for tag in &node.tags {
                if !seen.insert(tag) {
                    continue;
                }
                let stats = out.entry(tag.clone()).or_default();
                stats.lines += 1;
                if own.contains(tag) {
                    stats.declared += 1;
                }
                match node.line.task {
                    TaskStatus::Complete => stats.complete += 1,
                    TaskStatus::Incomplete => stats.incomplete += 1,
                    TaskStatus::Unset => {}
                }
                stats.elapsed_seconds = stats
                    .elapsed_seconds
                    .saturating_add(node.line.elapsed_seconds.unwrap_or(0));
            }
        });
        out
    }

}

pub mod reorder {
    //! Drag-and-drop reordering: fold-aware selection expansion, the move itself, and the
    //! indent rebase that fits the moved block into its new neighborhood.

    use crate::core::{Line, LineId, OutlineError, check_selection};
    use crate::fold::{FoldState, compute_fold_states};
    use std::collections::{BTreeSet, HashSet};
    use tracing::debug;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum MoveOutcome {
        /// The requested move would leave the order unchanged.
        NoOp,
        Moved(Vec<Line>),
    }

    impl MoveOutcome {
        pub fn is_noop(&self) -> bool {
            matches!(self, MoveOutcome::NoOp)
        }

        pub fn into_lines(self) -> Option<Vec<Line>> {
            match self {
                MoveOutcome::NoOp => None,
                MoveOutcome::Moved(lines) => Some(lines),
            }
        }
    }

    /// Grow a selection so that every selected fold start drags its hidden descendants along.
    /// Result is deduplicated and ascending.
    pub fn expand_folded_selection(
        lines: &[Line],
        selected: &[usize],
        fold_states: &[FoldState],
    ) -> Vec<usize> {
        let mut out: BTreeSet<usize> = selected.iter().copied().collect();
        for &index in selected {
            if fold_states.get(index) != Some(&FoldState::CollapseStart) {
                continue;
            }
            let Some(start) = lines.get(index) else {
                continue;
            };
            out.extend(
                (index + 1..lines.len()).take_while(|&j| lines[j].indent > start.indent),
            );
        }
        out.into_iter().collect()
    }

    /// Move the lines at `dragged` so they end up in front of the line currently at
    /// `insert_before`. Dragged lines keep their relative order.
    ///
    /// An `insert_before` at or past the end appends. When `insert_before` is itself one of
    /// the dragged lines, the block lands where that line would sit among the remaining
    /// lines, i.e. after every non-dragged line that precedes it.
    pub fn compute_move(
        lines: &[Line],
        dragged: &[usize],
        insert_before: usize,
    ) -> Result<MoveOutcome, OutlineError> {
        if dragged.is_empty() {
            return Ok(MoveOutcome::NoOp);
        }
        check_selection(dragged, lines.len())?;

        let mut sorted = dragged.to_vec();
        sorted.sort_unstable();
        let block_start = sorted[0];
        let block_end = sorted[sorted.len() - 1];
        let is_contiguous = sorted.windows(2).all(|pair| pair[1] == pair[0] + 1);

        if is_contiguous && (block_start..=block_end + 1).contains(&insert_before) {
            debug!(block_start, block_end, insert_before, "move is a no-op");
            return Ok(MoveOutcome::NoOp);
        }

        let dragged_set: HashSet<usize> = sorted.iter().copied().collect();
        let mut remaining = Vec::with_capacity(lines.len() - sorted.len());
        let mut moving = Vec::with_capacity(sorted.len());
        let mut insert_position = None;

        for (index, line) in lines.iter().enumerate() {
            if index == insert_before {
                insert_position = Some(remaining.len());
            }
            if dragged_set.contains(&index) {
                moving.push(line.clone());
            } else {
                remaining.push(line.clone());
            }
        }

        let insert_position = insert_position.unwrap_or(remaining.len());
        debug!(
            dragged = sorted.len(),
            insert_before, insert_position, "moving lines"
        );
        remaining.splice(insert_position..insert_position, moving);
        Ok(MoveOutcome::Moved(remaining))
    }

    /// Shift the dragged block uniformly so its first line takes the indent of the line now
    /// above it (0 at the top). Indents clamp at 0; other lines are untouched. A shift that
    /// would push an indent past `u32::MAX` is rejected rather than flattened.
    pub fn rebase_indent(
        mut lines: Vec<Line>,
        dragged: &HashSet<LineId>,
    ) -> Result<Vec<Line>, OutlineError> {
        let Some(first) = lines.iter().position(|line| dragged.contains(&line.id())) else {
            return Ok(lines);
        };
        let target = match first {
            0 => 0,
            _ => lines[first - 1].indent,
        };
        let delta = i64::from(target) - i64::from(lines[first].indent);
        if delta == 0 {
            return Ok(lines);
        }

        for (index, line) in lines.iter_mut().enumerate() {
            if dragged.contains(&line.id()) {
                line.indent = shift_indent(line.indent, delta)
                    .ok_or(OutlineError::IndentOverflow { index })?;
            }
        }
        Ok(lines)
    }

    /// `indent + delta`, clamped at 0; `None` past `u32::MAX`.
    pub(crate) fn shift_indent(indent: u32, delta: i64) -> Option<u32> {
        u32::try_from((i64::from(indent) + delta).max(0)).ok()
    }

    /// The whole drag gesture: expand folded selections, move, rebase.
    pub fn move_selection(
        lines: &[Line],
        selected: &[usize],
        insert_before: usize,
    ) -> Result<MoveOutcome, OutlineError> {
        check_selection(selected, lines.len())?;
        let states = compute_fold_states(lines);
        let expanded = expand_folded_selection(lines, selected, &states);
        let ids: HashSet<LineId> = expanded.iter().map(|&i| lines[i].id()).collect();

        Ok(match compute_move(lines, &expanded, insert_before)? {
            MoveOutcome::NoOp => MoveOutcome::NoOp,
            MoveOutcome::Moved(moved) => MoveOutcome::Moved(rebase_indent(moved, &ids)?),
        })
    }

}

pub mod history {
    //! Snapshot-based undo/redo. Entries own full copies of past documents, so later edits to
    //! the live document can never reach into a stored entry.

    use crate::core::Document;
    use std::collections::VecDeque;
    use tracing::{debug, trace};

    pub const DEFAULT_HISTORY_LIMIT: usize = 100;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UndoEntry {
        pub document: Document,
        pub focused_line: usize,
    }

    impl UndoEntry {
        /// Focus clamped to the entry's own document.
        pub fn clamped_focus(&self) -> usize {
            self.focused_line.min(self.document.line_count().saturating_sub(1))
        }
    }

    #[derive(Debug, Clone)]
    pub struct HistoryManager {
        undo_stack: VecDeque<UndoEntry>,
        redo_stack: Vec<UndoEntry>,
        max_entries: usize,
        /// While set, replacements are restores and are not recorded.
        suppressed: bool,
    }

    impl Default for HistoryManager {
        fn default() -> Self {
            Self::new(DEFAULT_HISTORY_LIMIT)
        }
    }

    impl HistoryManager {
        pub fn new(max_entries: usize) -> Self {
            Self {
                undo_stack: VecDeque::new(),
                redo_stack: Vec::new(),
                max_entries,
                suppressed: false,
            }
        }

        pub fn can_undo(&self) -> bool {
            !self.undo_stack.is_empty()
        }

        pub fn can_redo(&self) -> bool {
            !self.redo_stack.is_empty()
        }

        pub fn undo_depth(&self) -> usize {
            self.undo_stack.len()
        }

        pub fn redo_depth(&self) -> usize {
            self.redo_stack.len()
        }

        pub fn max_entries(&self) -> usize {
            self.max_entries
        }

        pub fn is_suppressed(&self) -> bool {
            self.suppressed
        }

        pub fn suppress(&mut self) {
            self.suppressed = true;
        }

        pub fn resume(&mut self) {
            self.suppressed = false;
        }

        /// Snapshot the document that is about to be replaced. Returns whether an entry was
        /// recorded. A new recording invalidates the redo branch.
        pub fn record_if_needed(&mut self, prior: &Document, focused_line: usize) -> bool {
            if self.suppressed {
                return false;
            }
            self.redo_stack.clear();
            self.push_undo(UndoEntry {
                document: prior.clone(),
                focused_line,
            });
            true
        }

        /// Pop the latest entry; `current` moves onto the redo stack. The caller applies the
        /// returned entry with recording suppressed.
        pub fn undo(&mut self, current: &Document, focused_line: usize) -> Option<UndoEntry> {
            let mut entry = self.undo_stack.pop_back()?;
            self.redo_stack.push(UndoEntry {
                document: current.clone(),
                focused_line,
            });
            entry.focused_line = entry.clamped_focus();
            debug!(
                undo = self.undo_stack.len(),
                redo = self.redo_stack.len(),
                "undo"
            );
            Some(entry)
        }

        pub fn redo(&mut self, current: &Document, focused_line: usize) -> Option<UndoEntry> {
            let mut entry = self.redo_stack.pop()?;
            self.push_undo(UndoEntry {
                document: current.clone(),
                focused_line,
            });
            entry.focused_line = entry.clamped_focus();
            debug!(
                undo = self.undo_stack.len(),
                redo = self.redo_stack.len(),
                "redo"
            );
            Some(entry)
        }

        /// Forget everything, e.g. when the session switches documents.
        pub fn reset(&mut self) {
            self.undo_stack.clear();
            self.redo_stack.clear();
        }

        fn push_undo(&mut self, entry: UndoEntry) {
            self.undo_stack.push_back(entry);
            while self.undo_stack.len() > self.max_entries {
                self.undo_stack.pop_front();
                trace!(max = self.max_entries, "evicted oldest undo entry");
            }
        }
    }

}

pub mod config {
    //! Session and text-format settings. Every field has a default, so partial JSON files
    //! (or none at all) are fine.

    use crate::core::CURRENT_SCHEMA_VERSION;
    use crate::history::DEFAULT_HISTORY_LIMIT;
    use anyhow::{Context, Result, bail};
    use serde::{Deserialize, Serialize};
    use std::{fs, path::Path};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct Settings {
        /// Maximum number of undo entries kept per session.
        pub history_limit: usize,
        /// Spaces per indent level in the plain-text format.
        pub indent_width: usize,
        /// Version stamped on documents imported from plain text.
        pub schema_version: u32,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                history_limit: DEFAULT_HISTORY_LIMIT,
                indent_width: 2,
                schema_version: CURRENT_SCHEMA_VERSION,
            }
        }
    }

    impl Settings {
        pub fn from_json_str(text: &str) -> Result<Self> {
            let settings: Settings = serde_json::from_str(text).context("parsing settings")?;
            if settings.indent_width == 0 {
                bail!("indentWidth must be at least 1");
            }
            Ok(settings)
        }

        pub fn load(path: &Path) -> Result<Self> {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            Self::from_json_str(&text).with_context(|| format!("loading settings from {:?}", path))
        }
    }

}

pub mod session {
    //! The single write path. Every document replacement goes through
    //! [`EditorSession::replace_document`], which snapshots the prior value unless the
    //! replacement is itself an undo/redo restore.

    use crate::config::Settings;
    use crate::core::{Color, Document, Line, LineId, OutlineError, TaskStatus, check_index};
    use crate::fold::{FoldState, compute_fold_states, has_children, subtree_end};
    use crate::hierarchy::{OutlineTree, build_tree};
    use crate::history::{HistoryManager, UndoEntry};
    use crate::reorder::{MoveOutcome, move_selection, shift_indent};
    use chrono::{DateTime, Duration, Utc};
    use tracing::{debug, warn};

    /// Source of timestamps for new lines and modifications.
    pub trait Clock {
        fn now(&self) -> DateTime<Utc>;
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    pub struct EditorSession<C: Clock = SystemClock> {
        document: Document,
        history: HistoryManager,
        focused_line: usize,
        clock: C,
        /// Newest identity handed out (or found in the document); new lines must exceed it.
        last_issued: Option<DateTime<Utc>>,
    }

    impl EditorSession<SystemClock> {
        pub fn new(document: Document, settings: &Settings) -> Self {
            Self::with_clock(document, settings, SystemClock)
        }
    }

    impl<C: Clock> EditorSession<C> {
        pub fn with_clock(document: Document, settings: &Settings, clock: C) -> Self {
            let last_issued = document.newest_identity().map(|id| id.0);
            Self {
                document,
                history: HistoryManager::new(settings.history_limit),
                focused_line: 0,
                clock,
                last_issued,
            }
        }

        pub fn document(&self) -> &Document {
            &self.document
        }

        pub fn focused_line(&self) -> usize {
            self.focused_line
        }

        pub fn history(&self) -> &HistoryManager {
            &self.history
        }

        pub fn fold_states(&self) -> Vec<FoldState> {
            compute_fold_states(&self.document.children)
        }

        pub fn tree(&self) -> OutlineTree {
            build_tree(&self.document)
        }

        /// Install `next` as the live document, recording the prior one unless suppressed.
        pub fn replace_document(&mut self, next: Document, focus: usize) {
            self.history.record_if_needed(&self.document, self.focused_line);
            self.document = next;
            self.focused_line = focus.min(self.document.line_count().saturating_sub(1));
        }

        /// Start over with another document; history does not carry across documents.
        pub fn switch_document(&mut self, document: Document) {
            self.history.reset();
            if let Some(id) = document.newest_identity() {
                self.last_issued = self.last_issued.max(Some(id.0));
            }
            self.document = document;
            self.focused_line = 0;
        }

        /// Creation timestamp for a new line, strictly newer than any handed out before.
        fn issue_identity(&mut self) -> Result<DateTime<Utc>, OutlineError> {
            let now = self.clock.now();
            let issued = match self.last_issued {
                Some(last) if now <= last => last
                    .checked_add_signed(Duration::milliseconds(1))
                    .ok_or(OutlineError::IdentityExhausted(LineId(last)))?,
                _ => now,
            };
            self.last_issued = Some(issued);
            Ok(issued)
        }

        /* ------------------------------ Structure ------------------------------ */

        /// Insert a sibling right after `after` (or a top-level line at the very start when
        /// `None`). Returns the new line's index, which also receives focus.
        pub fn insert_line_after(
            &mut self,
            after: Option<usize>,
            content: impl Into<String>,
        ) -> Result<usize, OutlineError> {
            let (index, indent) = match after {
                Some(i) => {
                    check_index(i, self.document.line_count())?;
                    (i + 1, self.document.children[i].indent)
                }
                None => (0, 0),
            };
            let line = Line::new(content, indent, self.issue_identity()?);
            let mut next = self.document.clone();
            next.children.insert(index, line);
            self.replace_document(next, index);
            Ok(index)
        }

        /// Remove one line. Its descendants stay and re-attach to whatever now precedes them.
        pub fn delete_line(&mut self, index: usize) -> Result<Line, OutlineError> {
            check_index(index, self.document.line_count())?;
            if self.document.line_count() == 1 {
                return Err(OutlineError::LastLine);
            }
            let mut next = self.document.clone();
            let removed = next.children.remove(index);
            self.replace_document(next, index.saturating_sub(1));
            Ok(removed)
        }

        /// Indent the line and its subtree by one level. A line can sit at most one level
        /// deeper than the line above it. Returns whether anything changed.
        pub fn indent_line(&mut self, index: usize) -> Result<bool, OutlineError> {
            check_index(index, self.document.line_count())?;
            if index == 0 {
                return Ok(false);
            }
            let lines = &self.document.children;
            if lines[index].indent > lines[index - 1].indent {
                return Ok(false);
            }
            self.shift_subtree(index, 1)?;
            Ok(true)
        }

        pub fn outdent_line(&mut self, index: usize) -> Result<bool, OutlineError> {
            check_index(index, self.document.line_count())?;
            if self.document.children[index].indent == 0 {
                return Ok(false);
            }
            self.shift_subtree(index, -1)?;
            Ok(true)
        }

        fn shift_subtree(&mut self, index: usize, delta: i64) -> Result<(), OutlineError> {
            let now = self.clock.now();
            let end = subtree_end(&self.document.children, index);
            let mut next = self.document.clone();
            for (i, line) in next.children[index..end].iter_mut().enumerate() {
                line.indent = shift_indent(line.indent, delta)
                    .ok_or(OutlineError::IndentOverflow { index: index + i })?;
                line.touch(now);
            }
            self.replace_document(next, index);
            Ok(())
        }

        /// Flip the fold flag. Lines without children cannot be folded (but an existing
        /// stale flag can always be cleared). Returns whether anything changed.
        pub fn toggle_fold(&mut self, index: usize) -> Result<bool, OutlineError> {
            check_index(index, self.document.line_count())?;
            let line = &self.document.children[index];
            if !line.folded && !has_children(&self.document.children, index) {
                debug!(index, "nothing to fold");
                return Ok(false);
            }
            self.edit_line(index, |line| line.folded = !line.folded)?;
            Ok(true)
        }

        /// Drag the selected lines in front of `insert_before`. Folded selections carry their
        /// hidden descendants and the block is rebased to its new neighborhood. Returns
        /// whether the document changed.
        pub fn move_lines(
            &mut self,
            selected: &[usize],
            insert_before: usize,
        ) -> Result<bool, OutlineError> {
            let outcome = move_selection(&self.document.children, selected, insert_before)
                .inspect_err(|err| warn!(%err, "rejected move"))?;
            let MoveOutcome::Moved(lines) = outcome else {
                return Ok(false);
            };

            let first_id = selected
                .iter()
                .min()
                .map(|&i| self.document.children[i].id());
            let mut next = self.document.clone();
            next.children = lines;
            let focus = first_id
                .and_then(|id| next.index_of(id))
                .unwrap_or(self.focused_line);
            self.replace_document(next, focus);
            Ok(true)
        }

        /* ------------------------------ Attributes ------------------------------ */

        pub fn set_content(
            &mut self,
            index: usize,
            content: impl Into<String>,
        ) -> Result<(), OutlineError> {
            let content = content.into();
            self.edit_line(index, move |line| line.content = content)
        }

        pub fn set_task_status(
            &mut self,
            index: usize,
            status: TaskStatus,
        ) -> Result<(), OutlineError> {
            self.edit_line(index, |line| line.task = status)
        }

        pub fn cycle_task_status(&mut self, index: usize) -> Result<TaskStatus, OutlineError> {
            let mut status = TaskStatus::Unset;
            self.edit_line(index, |line| {
                line.task = line.task.cycle();
                status = line.task;
            })?;
            Ok(status)
        }

        /// Add timer time to a line.
        pub fn add_elapsed(&mut self, index: usize, seconds: u64) -> Result<u64, OutlineError> {
            let mut total = 0;
            self.edit_line(index, |line| {
                total = line.elapsed_seconds.unwrap_or(0).saturating_add(seconds);
                line.elapsed_seconds = Some(total);
            })?;
            Ok(total)
        }

        pub fn toggle_pin(&mut self, index: usize) -> Result<bool, OutlineError> {
            let now = self.clock.now();
            let mut pinned = false;
            self.edit_line(index, |line| {
                line.pinned_at = match line.pinned_at {
                    Some(_) => None,
                    None => Some(now),
                };
                pinned = line.is_pinned();
            })?;
            Ok(pinned)
        }

        pub fn set_color(
            &mut self,
            index: usize,
            color: Option<Color>,
        ) -> Result<(), OutlineError> {
            self.edit_line(index, |line| line.color = color)
        }

        fn edit_line(
            &mut self,
            index: usize,
            f: impl FnOnce(&mut Line),
        ) -> Result<(), OutlineError> {
            check_index(index, self.document.line_count())?;
            let now = self.clock.now();
            let mut next = self.document.clone();
            let line = &mut next.children[index];
            f(line);
            line.touch(now);
            self.replace_document(next, index);
            Ok(())
        }

        /* ------------------------------ History ------------------------------ */

        /// Returns false when there is nothing to undo.
        pub fn undo(&mut self) -> bool {
            match self.history.undo(&self.document, self.focused_line) {
                Some(entry) => {
                    self.restore(entry);
                    true
                }
                None => false,
            }
        }

        pub fn redo(&mut self) -> bool {
            match self.history.redo(&self.document, self.focused_line) {
                Some(entry) => {
                    self.restore(entry);
                    true
                }
                None => false,
            }
        }

        fn restore(&mut self, entry: UndoEntry) {
            self.history.suppress();
            self.replace_document(entry.document, entry.focused_line);
            self.history.resume();
        }
    }

}

pub mod storage {
    use crate::core::Document;
    use anyhow::{Context, Result};
    use std::{fs, path::Path};

    /// Load/save whole documents. The on-disk format belongs to the implementation.
    pub trait DocumentStore {
        fn load(&self, path: &Path) -> Result<Document>;
        fn save(&self, path: &Path, document: &Document) -> Result<()>;
    }

    /// Parsing from foreign text formats is independent of storage.
    pub trait OutlineParser {
        fn parse_file(&self, abs_path: &Path) -> Result<Document>;
    }

    /// Pretty-printed JSON, one document per file.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct JsonFileStore;

    impl DocumentStore for JsonFileStore {
        fn load(&self, path: &Path) -> Result<Document> {
            let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            let document: Document = serde_json::from_str(&text)
                .with_context(|| format!("decoding document {:?}", path))?;
            document
                .validate()
                .with_context(|| format!("validating document {:?}", path))?;
            Ok(document)
        }

        fn save(&self, path: &Path, document: &Document) -> Result<()> {
            let json = serde_json::to_string_pretty(document)?;
            fs::write(path, json.as_bytes()).with_context(|| format!("writing {:?}", path))
        }
    }

}

pub mod parser {
    //! Plain-text outline import built on `nom`.
    //!
    //! One outline line per text line: leading spaces divided by the indent width give the
    //! indent (each tab is one level), an optional `[ ] ` / `[x] ` prefix sets the task
    //! status, and blank lines are skipped. A single `\\` right after that escapes content
    //! that would otherwise read as indentation or a checkbox; it is dropped on import.

    use crate::core::{Document, Line, TaskStatus};
    use crate::storage::OutlineParser;
    use anyhow::{Context, Result, anyhow, bail};
    use chrono::{DateTime, Duration, Utc};
    use nom::{
        IResult,
        branch::alt,
        bytes::complete::take_while,
        character::complete::{char, one_of},
        combinator::{opt, rest, value},
        error::VerboseError,
        sequence::{delimited, terminated, tuple},
    };
    use std::{fs, path::Path};
    use tracing::warn;

    /* ------------------------ Public entry points ------------------------ */

    /// Parse indented text. Line identities start at `created_from` and step by 1ms in
    /// document order.
    pub fn parse_outline_from_str(
        input: &str,
        indent_width: usize,
        created_from: DateTime<Utc>,
    ) -> Result<Document> {
        if indent_width == 0 {
            bail!("indent width must be at least 1");
        }

        let mut children = Vec::new();
        for (number, raw) in input.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            let (_, parsed) = outline_line(raw).map_err(to_anyhow(number + 1))?;
            if parsed.spaces % indent_width != 0 {
                warn!(
                    line = number + 1,
                    spaces = parsed.spaces,
                    indent_width,
                    "indentation is not a multiple of the indent width; rounding down"
                );
            }
            let indent = u32::try_from(parsed.spaces / indent_width + parsed.tabs)
                .with_context(|| format!("indent too deep on line {}", number + 1))?;
            let created_at = i64::try_from(children.len())
                .ok()
                .and_then(|offset| created_from.checked_add_signed(Duration::milliseconds(offset)))
                .with_context(|| format!("no line identity left for line {}", number + 1))?;
            children.push(Line::new(parsed.content, indent, created_at).with_task(parsed.task));
        }
        Ok(Document::with_lines(children))
    }

    /// File-backed parser implementing `storage::OutlineParser`.
    #[derive(Debug, Clone, Copy)]
    pub struct TextOutlineParser {
        pub indent_width: usize,
    }

    impl OutlineParser for TextOutlineParser {
        fn parse_file(&self, abs_path: &Path) -> Result<Document> {
            let text =
                fs::read_to_string(abs_path).with_context(|| format!("reading {:?}", abs_path))?;
            parse_outline_from_str(&text, self.indent_width, Utc::now())
                .with_context(|| format!("parsing {:?}", abs_path))
        }
    }

    type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

    fn to_anyhow(line_number: usize) -> impl Fn(nom::Err<VerboseError<&str>>) -> anyhow::Error {
        move |e| match e {
            nom::Err::Error(ve) | nom::Err::Failure(ve) => {
                anyhow!("parse error on line {}: {:?}", line_number, ve.errors)
            }
            nom::Err::Incomplete(_) => anyhow!("incomplete input on line {}", line_number),
        }
    }

    /* ------------------------------- Lines ------------------------------- */

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct ParsedLine<'a> {
        spaces: usize,
        tabs: usize,
        task: TaskStatus,
        content: &'a str,
    }

    fn leading_whitespace(i: &str) -> PResult<'_, &str> {
        take_while(|c: char| c == ' ' || c == '\t')(i)
    }

    fn checkbox(i: &str) -> PResult<'_, TaskStatus> {
        terminated(
            delimited(
                char('['),
                alt((
                    value(TaskStatus::Incomplete, char(' ')),
                    value(TaskStatus::Complete, one_of("xX")),
                )),
                char(']'),
            ),
            char(' '),
        )(i)
    }

    fn outline_line(i: &str) -> PResult<'_, ParsedLine<'_>> {
        let (i, (ws, task, _, content)) =
            tuple((leading_whitespace, opt(checkbox), opt(char('\\')), rest))(i)?;
        let tabs = ws.chars().filter(|&c| c == '\t').count();
        Ok((
            i,
            ParsedLine {
                spaces: ws.len() - tabs,
                tabs,
                task: task.unwrap_or_default(),
                content,
            },
        ))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::test_support::{at, contents, indents};

        #[test]
        fn line_shapes() {
            let (_, p) = outline_line("    [x] done #t").unwrap();
            assert_eq!(p.spaces, 4);
            assert_eq!(p.task, TaskStatus::Complete);
            assert_eq!(p.content, "done #t");

            let (_, p) = outline_line("\t\t[ ] todo").unwrap();
            assert_eq!(p.tabs, 2);
            assert_eq!(p.task, TaskStatus::Incomplete);

            // No trailing space after the box: plain content.
            let (_, p) = outline_line("[x]").unwrap();
            assert_eq!(p.task, TaskStatus::Unset);
            assert_eq!(p.content, "[x]");

            let (_, p) = outline_line("  \\[x] literal").unwrap();
            assert_eq!(p.spaces, 2);
            assert_eq!(p.task, TaskStatus::Unset);
            assert_eq!(p.content, "[x] literal");

            let (_, p) = outline_line("[ ] \\  padded").unwrap();
            assert_eq!(p.task, TaskStatus::Incomplete);
            assert_eq!(p.content, "  padded");
        }

        #[test]
        fn document_from_indented_text() {
            let text = "Project #work\n  [ ] write spec\n    notes\n\n  [X] review\nInbox\n";
            let doc = parse_outline_from_str(text, 2, at(100)).expect("parse");
            assert_eq!(
                contents(&doc.children),
                vec!["Project #work", "write spec", "notes", "review", "Inbox"]
            );
            assert_eq!(indents(&doc.children), vec![0, 1, 2, 1, 0]);
            assert_eq!(doc.children[1].task, TaskStatus::Incomplete);
            assert_eq!(doc.children[3].task, TaskStatus::Complete);
            assert_eq!(doc.children[4].created_at, at(104));
            assert!(doc.validate().is_ok());
        }

        #[test]
        fn odd_indentation_rounds_down() {
            let doc = parse_outline_from_str("a\n   b\n", 2, at(0)).expect("parse");
            assert_eq!(indents(&doc.children), vec![0, 1]);
        }

        #[test]
        fn identities_past_the_last_timestamp_are_an_error() {
            let err = parse_outline_from_str("a\nb\n", 2, DateTime::<Utc>::MAX_UTC).unwrap_err();
            assert!(format!("{err:#}").contains("line 2"));
        }

        #[test]
        fn zero_indent_width_is_an_error() {
            assert!(parse_outline_from_str("a", 0, at(0)).is_err());
        }

        #[test]
        fn parser_reads_files() {
            let tmp = tempfile::tempdir().expect("tempdir");
            let path = tmp.path().join("notes.txt");
            fs::write(&path, "a\n    b\n").expect("write notes");
            let doc = TextOutlineParser { indent_width: 4 }
                .parse_file(&path)
                .expect("parse file");
            assert_eq!(indents(&doc.children), vec![0, 1]);
        }
    }
}

pub mod format {
    //! Plain-text outline export; the inverse of `parser`.

    use crate::core::{Document, TaskStatus};

    pub fn format_document(document: &Document, indent_width: usize) -> String {
        let mut out = String::new();
        for line in &document.children {
            out.push_str(&" ".repeat(line.indent as usize * indent_width));
            out.push_str(match line.task {
                TaskStatus::Complete => "[x] ",
                TaskStatus::Incomplete => "[ ] ",
                TaskStatus::Unset => "",
            });
            // One text line per outline line.
            let content = line.content.replace(['\r', '\n'], " ");
            if needs_escape(&content) {
                out.push('\\');
            }
            out.push_str(&content);
            out.push('\n');
        }
        out
    }

    /// Content the parser would otherwise read as indentation, a checkbox or a blank line.
    fn needs_escape(content: &str) -> bool {
        content.trim().is_empty()
            || content.starts_with([' ', '\t', '\\'])
            || ["[ ] ", "[x] ", "[X] "]
                .iter()
                .any(|prefix| content.starts_with(prefix))
    }

}

pub use crate::core::{Document, Line, LineId, OutlineError, Tag, TaskStatus, extract_tags};
pub use config::Settings;
pub use fold::{FoldState, compute_fold_states};
pub use format::format_document;
pub use hierarchy::{OutlineTree, TreeNode, build_tree, tag_statistics};
pub use history::{HistoryManager, UndoEntry};
pub use parser::{TextOutlineParser, parse_outline_from_str};
pub use reorder::{
    MoveOutcome, compute_move, expand_folded_selection, move_selection, rebase_indent,
};
pub use session::EditorSession;
