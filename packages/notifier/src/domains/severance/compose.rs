//! Renders the per-account notification body.
//!
//! Pure functions: identical inputs always produce the identical string.
//! List ordering inside a paragraph follows set iteration order and carries
//! no meaning.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::models::Handle;
use super::relations::AccountRelations;

/// Context shared by every notification of one run.
#[derive(Debug, Clone)]
pub struct SeveranceContext {
    /// Domain of the instance being suspended, e.g. `remote.example`.
    pub remote_instance: String,
    /// Free text, no trailing period.
    pub reason: String,
    pub suspension_date: NaiveDateTime,
}

/// Subject line shared by all notifications of one run, shown as the
/// content warning of the DM.
pub fn subject(ctx: &SeveranceContext) -> String {
    format!(
        "You are affected by a future suspension ({})",
        ctx.remote_instance
    )
}

/// Renders the notification body for one affected account.
///
/// Paragraphs appear in fixed order; the three relation paragraphs are only
/// rendered for non-empty sets.
pub fn compose(recipient: &Handle, relations: &AccountRelations, ctx: &SeveranceContext) -> String {
    let mutuals = list_paragraph("You are currently mutuals with:", &relations.mutual);
    let follows = list_paragraph("You are currently following:", &relations.outbound_only);
    let followers = list_paragraph(
        "The following users are currently following you:",
        &relations.inbound_only,
    );

    format!(
        "{recipient} Hi, you are receiving this message because you are affected by a future suspension of {remote}.\n\
         We plan to suspend {remote} due to {reason}.\n\
         This is scheduled to occur on the following date: {date}.\n\
         The suspension will have the following impacts on you:\n\n\
         You will no longer be able to interact with any users from {remote} as soon as the suspension goes into effect.\n\n\
         The following connections will be severed:\n\n\
         {mutuals}{follows}{followers}\
         We understand that this causes quite a bit of disruption, but we have not made this decision lightly.\n\
         We are letting you know in advance so you can take action in order to stay in contact with these folks using alternate means.",
        recipient = recipient,
        remote = ctx.remote_instance,
        reason = ctx.reason,
        date = ctx.suspension_date.format("%Y-%m-%d %H:%M:%S"),
        mutuals = mutuals,
        follows = follows,
        followers = followers,
    )
}

fn list_paragraph(header: &str, handles: &BTreeSet<Handle>) -> String {
    if handles.is_empty() {
        return String::new();
    }

    let joined = handles
        .iter()
        .map(Handle::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{header}\n{joined}\n\n")
}
