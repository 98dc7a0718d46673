// The status heading, reduced to semantics: verbatim text plus a tone.
// The original web client styled the heading background by situation; a
// front-end maps the tone back to whatever styling it has.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatusTone {
    Standard,
    Success,
    Error,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusBanner {
    text: String,
    tone: StatusTone,
}

impl StatusBanner {
    pub fn new() -> Self {
        StatusBanner { text: String::new(), tone: StatusTone::Standard }
    }

    pub fn text(&self) -> &str { &self.text }
    pub fn tone(&self) -> StatusTone { self.tone }

    // Status text may contain markup; it is stored untouched.
    pub fn set_text(&mut self, text: String) { self.text = text; }

    pub fn set(&mut self, text: String, tone: StatusTone) {
        self.text = text;
        self.tone = tone;
    }

    // A new game restores the standard background but keeps the text.
    pub fn reset_tone(&mut self) { self.tone = StatusTone::Standard; }
}
