/// Which preset action the name form collects a name for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Save,
    Open,
}

/// Discrete user intents sent from the input task to the session task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Play or pause the simulation
    TogglePlay,
    /// Advance one generation while paused
    Step,
    /// Flip one cell while paused
    ToggleCell { x: usize, y: usize },
    Clear,
    Randomize,
    ToggleWrap,
    /// New board dimensions in cells
    Resize { width: usize, height: usize },
    /// Open the name form
    BeginInput(Prompt),
    /// Current text of the name form
    EditName(String),
    SavePreset(String),
    OpenPreset(String),
    CancelInput,
    CyclePreset,
    /// Hide or show the key help
    ToggleMenu,
    /// Hide or show every overlay, generation counter included
    ToggleAllInfo,
    Quit,
}
