//! # Page Hooks
//!
//! Per-page behavior that runs after every content swap. The fragment is a
//! fresh parse each time, so anything a hook set up on the previous one is
//! gone and has to be redone.
//!
//! | Page          | Hook                                                      |
//! |---------------|-----------------------------------------------------------|
//! | `skills`      | empty all bars, then fill them after a short delay         |
//! | `engagements` | disclosures become toggleable (closed), anchors scroll     |
//! | everything else | nothing                                                 |

use crate::core::fragment::Fragment;
use crate::core::page::Page;

/// Work a hook wants done later, once the swap has settled on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTask {
    FillBars,
}

pub type PageHook = fn(&mut Fragment) -> Option<HookTask>;

pub fn hook_for(page: Page) -> Option<PageHook> {
    match page {
        Page::Skills => Some(skills),
        Page::Engagements => Some(engagements),
        _ => None,
    }
}

/// Runs the hook for `page`, if any, and returns its deferred task.
pub fn run(page: Page, fragment: &mut Fragment) -> Option<HookTask> {
    hook_for(page).and_then(|hook| hook(fragment))
}

pub fn apply(task: HookTask, fragment: &mut Fragment) {
    match task {
        HookTask::FillBars => {
            for bar in fragment.bars_mut() {
                bar.width = bar.value;
            }
        }
    }
}

fn skills(fragment: &mut Fragment) -> Option<HookTask> {
    let mut any = false;
    for bar in fragment.bars_mut() {
        bar.width = 0;
        any = true;
    }
    any.then_some(HookTask::FillBars)
}

fn engagements(fragment: &mut Fragment) -> Option<HookTask> {
    fragment.disclosures_interactive = true;
    fragment.anchor_scroll = true;
    for disclosure in fragment.disclosures_mut() {
        disclosure.open = false;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fragment::Block;

    #[test]
    fn skills_resets_then_fills_bars() {
        let mut fragment = Fragment::parse("::: bar 80 Rust\n::: bar 40 Go\n");
        assert_eq!(run(Page::Skills, &mut fragment), Some(HookTask::FillBars));
        assert!(fragment.bars().all(|b| b.width == 0));

        apply(HookTask::FillBars, &mut fragment);
        let widths: Vec<u8> = fragment.bars().map(|b| b.width).collect();
        assert_eq!(widths, vec![80, 40]);
    }

    #[test]
    fn skills_without_bars_schedules_nothing() {
        let mut fragment = Fragment::parse("Nothing to animate.");
        assert_eq!(run(Page::Skills, &mut fragment), None);
    }

    #[test]
    fn engagements_closes_and_enables_disclosures() {
        let mut fragment = Fragment::parse("::: details A\nbody\n:::\n");
        assert_eq!(run(Page::Engagements, &mut fragment), None);
        assert!(fragment.disclosures_interactive);
        assert!(fragment.anchor_scroll);
        assert!(matches!(&fragment.blocks[0], Block::Disclosure(d) if !d.open));
    }

    #[test]
    fn other_pages_have_no_hook() {
        for page in [Page::Home, Page::About, Page::Contact] {
            assert!(hook_for(page).is_none());
        }
        let mut fragment = Fragment::parse("::: details A\nbody\n:::\n");
        run(Page::Home, &mut fragment);
        assert!(!fragment.disclosures_interactive);
    }
}
