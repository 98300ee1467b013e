//! Error type shared by every stage of a round, from loading cards to
//! submitting guesses.

use thiserror::Error;

use crate::card::CardId;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Not enough correct cards to fill a secret (or incorrect cards to pad
    /// the display pool at the chosen level).
    #[error("not enough cards: needed {needed}, available {available}")]
    InsufficientCards { needed: usize, available: usize },

    /// The game is below the minimum card counts required to play.
    #[error("game needs at least {min_correct} correct and {min_incorrect} incorrect cards (has {correct} and {incorrect})", min_correct = crate::MIN_CORRECT, min_incorrect = crate::MIN_INCORRECT)]
    NotEnoughCards { correct: usize, incorrect: usize },

    #[error("invalid manual code: {0}")]
    InvalidManualCode(String),

    #[error("invalid level {0}: expected 1 to 4")]
    InvalidLevel(u8),

    #[error("guess is incomplete: {filled} of {length} slots filled")]
    IncompleteGuess { filled: usize, length: usize },

    #[error("slot {slot} out of range for a code of length {length}")]
    SlotOutOfRange { slot: usize, length: usize },

    #[error("card {0} is not available")]
    CardUnavailable(CardId),

    #[error("round is already finished")]
    SessionFinished,

    #[error("round has not started")]
    SessionNotStarted,

    #[error("round is already in progress")]
    SessionAlreadyStarted,

    /// Two cards of the same game share an id.
    #[error("card id {0} appears more than once")]
    DuplicateCard(CardId),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("too many possible codes for a hint ({candidates})")]
    HintUnavailable { candidates: usize },
}

impl GameError {
    /// Whether the player can recover by editing cards or picking again.
    ///
    /// `InvalidLevel` means the caller handed the engine a level the
    /// selection screen never offers, so the flow aborts back to level
    /// selection instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::InvalidLevel(_))
    }

    /// Message shown to the player, in the game's language.
    pub fn player_message(&self) -> String {
        match self {
            GameError::InsufficientCards { needed, available } => format!(
                "Cartas insuficientes: são necessárias {needed}, há {available}. Adicione mais cartas ao jogo."
            ),
            GameError::NotEnoughCards { correct, incorrect } => format!(
                "O jogo precisa de pelo menos {} cartas corretas e {} incorretas (tem {correct} e {incorrect}). Adicione mais cartas antes de jogar.",
                crate::MIN_CORRECT,
                crate::MIN_INCORRECT
            ),
            GameError::InvalidManualCode(detail) => {
                format!("Código manual inválido ({detail}). Configure o modo manual novamente.")
            }
            GameError::InvalidLevel(level) => {
                format!("Nível {level} não existe. Escolha um nível de 1 a 4.")
            }
            GameError::IncompleteGuess { filled, length } => {
                format!("Palpite incompleto: {filled} de {length} espaços preenchidos.")
            }
            GameError::SlotOutOfRange { length, .. } => {
                format!("Espaço inválido: escolha um espaço de 1 a {length}.")
            }
            GameError::CardUnavailable(id) => format!("A carta {id} não está disponível."),
            GameError::SessionFinished => "A rodada já terminou.".to_string(),
            GameError::SessionNotStarted => "A rodada ainda não começou.".to_string(),
            GameError::SessionAlreadyStarted => "A rodada já está em andamento.".to_string(),
            GameError::DuplicateCard(id) => {
                format!("A carta {id} aparece mais de uma vez no jogo.")
            }
            GameError::InvalidRequest(detail) => format!("Pedido inválido: {detail}."),
            GameError::Store(detail) => format!("Não foi possível carregar o jogo: {detail}."),
            GameError::HintUnavailable { .. } => {
                "Dica indisponível: há códigos possíveis demais.".to_string()
            }
        }
    }
}
