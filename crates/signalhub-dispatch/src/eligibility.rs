//! Channel eligibility: whether a recipient may be delivered over a wanted
//! channel type.

use signalhub_core::{Channel, ChannelType};

/// Whether a recipient with the given selected channel id is eligible for
/// delivery over `wanted`, given the channels the directory returned for it.
///
/// Eligible iff some returned channel carries the selected id, is of the
/// wanted type, and is active. A recipient with no channel selected can never
/// match, and an empty channel list means zero matches - neither is an error.
pub fn channel_eligible(selected: Option<&str>, wanted: ChannelType, channels: &[Channel]) -> bool {
    let Some(selected) = selected else {
        return false;
    };
    channels
        .iter()
        .any(|c| c.id == selected && c.channel_type == wanted && c.is_active)
}
