use crate::host::error::HostError;
use crate::host::input::InputChannel;
use crate::host::scene_model::NodeId;

/// How a card actually gets played through the synthetic input channel.
///
/// Kept behind a trait because the working gesture is a workaround with no
/// confirmed mechanism: the host's drag handlers ignore single-shot
/// synthetic clicks and programmatic drag sequences. A future, more direct
/// invocation path replaces the strategy without touching the duel state
/// machine.
pub trait PlayGesture {
    fn play(
        &mut self,
        input: &mut dyn InputChannel,
        card: NodeId,
        viewport: (f32, f32),
    ) -> Result<(), HostError>;
}

/// The sequence the host responds to: first click selects/highlights,
/// second click picks the card up, a click at the viewport center confirms.
pub struct TwoStepCenterGesture;

impl PlayGesture for TwoStepCenterGesture {
    fn play(
        &mut self,
        input: &mut dyn InputChannel,
        card: NodeId,
        viewport: (f32, f32),
    ) -> Result<(), HostError> {
        input.click_node(card)?;
        input.click_node(card)?;
        let (w, h) = viewport;
        input.click_at(w / 2.0, h / 2.0)
    }
}
