//! Role identities injected into every generated prompt.

use serde::{Deserialize, Serialize};

/// Who an agent is: name, courtroom role, goal, and static persona text.
///
/// The persona is flavor only; no behavior branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub persona: String,
}

impl RoleProfile {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        goal: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            goal: goal.into(),
            persona: persona.into(),
        }
    }

    pub fn prosecutor() -> Self {
        Self::new(
            "Prosecutor",
            "Lead Prosecutor",
            "Present compelling evidence and arguments to prove the defendant's guilt",
            "You are an experienced prosecutor known for your thorough preparation and \
             persuasive arguments. You have successfully prosecuted numerous high-profile \
             cases and are committed to seeking justice through the proper application of the law.",
        )
    }

    pub fn judge() -> Self {
        Self::new(
            "Judge",
            "Court Judge",
            "Ensure a fair trial and make impartial decisions based on law and evidence",
            "You are a highly respected judge known for your impartiality and deep \
             understanding of the law. You have presided over numerous high-profile cases and \
             are committed to ensuring that justice is served while maintaining proper \
             courtroom procedure and decorum.",
        )
    }

    pub fn witness(name: impl Into<String>) -> Self {
        Self::new(
            name,
            "Witness",
            "Provide accurate and truthful testimony based on personal knowledge when called \
             upon during the trial. Answer questions honestly and clearly.",
            "You are a witness called to testify in this case. Your specific background is \
             relevant only as it pertains to the events you witnessed or your credibility. \
             You have been sworn to tell the truth.",
        )
    }

    pub fn jury() -> Self {
        Self::new(
            "The Jury",
            "Jury",
            "Listen attentively to all presented evidence, testimony, and arguments, deliberate \
             impartially based on the judge's instructions and the facts, and reach a unanimous verdict.",
            "You are a panel of ordinary citizens selected for jury duty. Your role is to be the \
             impartial finder of fact, setting aside personal biases and deciding the case solely \
             on the evidence presented in court and the relevant law.",
        )
    }
}
