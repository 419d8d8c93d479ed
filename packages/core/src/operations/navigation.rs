//! Keyboard navigation between editable nodes of a section container
//!
//! Read-only helpers returning the id the cursor should move to, or `None`
//! when there is nowhere to go.

use crate::models::{Section, SectionContainer};

/// The section after `section_id` in `container`
pub fn next_section<'a>(container: &'a SectionContainer, section_id: &str) -> Option<&'a Section> {
    let index = container.position_of(section_id)?;
    container.children.get(index + 1)
}

/// The section before `section_id` in `container`
pub fn previous_section<'a>(container: &'a SectionContainer, section_id: &str) -> Option<&'a Section> {
    let index = container.position_of(section_id)?;
    index.checked_sub(1).and_then(|i| container.children.get(i))
}

/// Heading of the next section
pub fn next_editable_across_sections(container: &SectionContainer, section_id: &str) -> Option<String> {
    next_section(container, section_id).map(|s| s.heading.id.clone())
}

/// Last summary item of the previous section, else its heading
pub fn previous_editable_across_sections(container: &SectionContainer, section_id: &str) -> Option<String> {
    previous_section(container, section_id).map(last_editable_in_summary)
}

/// Previous summary item, or the heading for the first item
pub fn previous_editable_in_summary(section: &Section, content_id: &str) -> Option<String> {
    let index = section.summary.iter().position(|n| n.id() == content_id)?;
    match index {
        0 => Some(section.heading.id.clone()),
        i => Some(section.summary[i - 1].id().to_string()),
    }
}

/// First summary item below the heading
pub fn next_editable_after_heading(section: &Section) -> Option<String> {
    section.summary.first().map(|n| n.id().to_string())
}

fn last_editable_in_summary(section: &Section) -> String {
    section
        .summary
        .last()
        .map(|n| n.id().to_string())
        .unwrap_or_else(|| section.heading.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContainerDefaults, Placeholders};
    use chrono::{DateTime, Utc};

    fn ts() -> DateTime<Utc> {
        "2025-02-23T01:04:00Z".parse().unwrap()
    }

    fn container() -> SectionContainer {
        let mut c = SectionContainer::new(&ContainerDefaults::default(), ts());
        c.children.push(Section::placeholder(1, &Placeholders::default(), ts()));
        c.children.push(Section::placeholder(1, &Placeholders::default(), ts()));
        c
    }

    #[test]
    fn test_across_sections() {
        let mut c = container();
        let first = c.children[0].id.clone();
        let second = c.children[1].id.clone();

        assert_eq!(
            next_editable_across_sections(&c, &first),
            Some(c.children[1].heading.id.clone())
        );
        assert_eq!(next_editable_across_sections(&c, &second), None);
        assert_eq!(
            previous_editable_across_sections(&c, &second),
            Some(c.children[0].summary[0].id().to_string())
        );
        assert_eq!(previous_editable_across_sections(&c, &first), None);

        c.children[0].summary.clear();
        assert_eq!(
            previous_editable_across_sections(&c, &second),
            Some(c.children[0].heading.id.clone())
        );
    }

    #[test]
    fn test_within_summary() {
        let mut s = Section::placeholder(1, &Placeholders::default(), ts());
        s.summary.push(s.children[0].clone());
        let first = s.summary[0].id().to_string();
        let second = s.summary[1].id().to_string();

        assert_eq!(previous_editable_in_summary(&s, &second), Some(first.clone()));
        assert_eq!(previous_editable_in_summary(&s, &first), Some(s.heading.id.clone()));
        assert_eq!(previous_editable_in_summary(&s, "missing"), None);
        assert_eq!(next_editable_after_heading(&s), Some(first));
    }
}
