use crate::{
    config::ValueCarry,
    lexer::{
        is_punctuation,
        keyword::Keyword,
        plan::QueryPlan,
        predicate::PendingPredicate,
        QueryError, Token, OR_CONNECTOR,
    },
};

/// Describes the input medium tokenizer
pub trait Tokenable<'a> {
    type Type;
    fn tokenize(&self, input: Self::Type) -> Result<Vec<Token>, QueryError>;
    fn parse(&self, tokens: Vec<Token>) -> Result<QueryPlan, QueryError>;
}

/// Split a query on single spaces. Empty words between repeated spaces are
/// kept, trailing ones are dropped.
pub fn split_words(input: &str) -> Vec<&str> {
    let mut words: Vec<&str> = input.split(' ').collect();
    while words.len() > 1 && words.last().is_some_and(|word| word.is_empty()) {
        words.pop();
    }
    words
}

/// Remove punctuation from a word, reporting whether any was found
pub fn strip_punctuation(word: &str) -> (String, bool) {
    let stripped: String = word.chars().filter(|c| !is_punctuation(*c)).collect();
    let punctuated = stripped.len() != word.len();
    (stripped, punctuated)
}

/// Classify one word of the query
pub fn classify(word: &str) -> Token {
    let (stripped, punctuated) = strip_punctuation(word);
    let lower = stripped.to_lowercase();
    if let Some(keyword) = Keyword::from_surface(&lower) {
        Token::Keyword(keyword)
    } else if lower == OR_CONNECTOR {
        Token::Or
    } else {
        Token::Value {
            text: word.to_string(),
            punctuated,
        }
    }
}

/// Processes space-separated keyword queries into a [`QueryPlan`]
///
/// Some examples of valid inputs:
///  - `titre Inception`
///  - `titre Inception ou titre Matrix de Nolan`
///  - `avec Brad Pitt, George Clooney apres 1990`
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer {
    carry: ValueCarry,
}

impl WordTokenizer {
    pub fn new(carry: ValueCarry) -> Self {
        WordTokenizer { carry }
    }

    /// Tokenize and parse in one step
    pub fn plan(&self, input: &str) -> Result<QueryPlan, QueryError> {
        let tokens = self.tokenize(input)?;
        self.parse(tokens)
    }
}

impl<'a> Tokenable<'a> for WordTokenizer {
    type Type = &'a str;

    fn tokenize(&self, input: Self::Type) -> Result<Vec<Token>, QueryError> {
        if input.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(split_words(input).into_iter().map(classify).collect())
    }

    fn parse(&self, tokens: Vec<Token>) -> Result<QueryPlan, QueryError> {
        let plan = tokens
            .into_iter()
            .try_fold(PlanBuilder::new(self.carry), PlanBuilder::step)?
            .finish()?;
        if plan.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(plan)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Building(PendingPredicate),
}

/// Fold state threaded through the tokens of one query
struct PlanBuilder {
    carry: ValueCarry,
    plan: QueryPlan,
    state: State,
    last_keyword: Option<Keyword>,
    pending_or: bool,
}

impl PlanBuilder {
    fn new(carry: ValueCarry) -> Self {
        PlanBuilder {
            carry,
            plan: QueryPlan::new(),
            state: State::Idle,
            last_keyword: None,
            pending_or: false,
        }
    }

    fn step(mut self, token: Token) -> Result<Self, QueryError> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.state = match token {
            Token::Keyword(keyword) => {
                self.commit(state)?;
                self.last_keyword = Some(keyword);
                State::Building(self.open(keyword))
            }
            Token::Or => {
                self.commit(state)?;
                self.pending_or = true;
                State::Idle
            }
            Token::Value { text, punctuated } => match state {
                // Repeated spaces
                state if text.is_empty() => state,
                State::Idle => {
                    let keyword = match (self.carry, self.last_keyword) {
                        (ValueCarry::Lenient, Some(keyword)) => keyword,
                        _ => return Err(QueryError::NoKeywordForValue),
                    };
                    State::Building(self.open(keyword).with_word(&text, punctuated))
                }
                State::Building(pending) if pending.is_punctuated() => {
                    let keyword = pending.keyword();
                    self.commit(State::Building(pending))?;
                    State::Building(self.open(keyword).with_word(&text, punctuated))
                }
                State::Building(pending) => {
                    State::Building(pending.with_word(&text, punctuated))
                }
            },
        };
        Ok(self)
    }

    /// Start a predicate, moving the pending OR flag onto it
    fn open(&mut self, keyword: Keyword) -> PendingPredicate {
        PendingPredicate::new(keyword, std::mem::take(&mut self.pending_or))
    }

    fn commit(&mut self, state: State) -> Result<(), QueryError> {
        if let State::Building(pending) = state {
            let or_joined = pending.is_or_joined();
            self.plan.add_predicate(pending.finish()?, or_joined);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<QueryPlan, QueryError> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.commit(state)?;
        Ok(self.plan)
    }
}
