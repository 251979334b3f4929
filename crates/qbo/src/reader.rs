//! Потоковый разбор текста выписки.
//!
//! Предоставляет [`StatementParser`] — однопроходный автомат с двумя состояниями,
//! который читает документ построчно и никогда не завершается ошибкой:
//! неизвестные теги сохраняются, отсутствующие поля заменяются значениями
//! по умолчанию (`"Unknown"`, `0.00`).

use std::{collections::BTreeMap, io::Read};

use tracing::{debug, warn};

use crate::{
    error::StatementResult,
    normalize::{parse_amount, parse_statement_date},
    statement::{AccountHeader, ParsedTransaction, StatementDocument, UNKNOWN},
};

const OPEN_TRANSACTION: &str = "<STMTTRN>";
const CLOSE_TRANSACTION: &str = "</STMTTRN>";

/// Состояние автомата.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Вне блока `<STMTTRN>` (начальное и конечное состояние).
    OutsideTransaction,
    /// Внутри блока `<STMTTRN>`, теги копятся в ожидающей записи.
    InsideTransaction,
}

/// Поле заголовка счёта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderField {
    BankId,
    AccountId,
    AccountType,
}

impl HeaderField {
    fn from_tag(name: &str) -> Option<Self> {
        match name {
            "BANKID" => Some(Self::BankId),
            "ACCTID" => Some(Self::AccountId),
            "ACCTTYPE" => Some(Self::AccountType),
            _ => None,
        }
    }
}

/// Классификация одной (уже обрезанной) строки.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    OpenTransaction,
    CloseTransaction,
    /// `<NAME>value`: имя до первого `>`, значение после него.
    Tag(&'a str, &'a str),
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        match line {
            OPEN_TRANSACTION => return Self::OpenTransaction,
            CLOSE_TRANSACTION => return Self::CloseTransaction,
            _ => {}
        }

        let Some(rest) = line.strip_prefix('<') else {
            return Self::Other;
        };
        if rest.starts_with('/') {
            return Self::Other;
        }
        match rest.split_once('>') {
            Some((name, value)) if !name.is_empty() => Self::Tag(name, value),
            _ => Self::Other,
        }
    }
}

/// Однопроходный разборщик выписки.
///
/// Строки подаются через [`feed_line`](Self::feed_line), результат забирается
/// через [`finish`](Self::finish).
///
/// # Пример
///
/// ```
/// use qbo::reader::StatementParser;
///
/// let mut parser = StatementParser::new();
/// for line in ["<BANKID>111", "<STMTTRN>", "<TRNAMT>-4.5", "<FOO>bar", "</STMTTRN>"] {
///     parser.feed_line(line);
/// }
/// let doc = parser.finish();
///
/// assert_eq!(doc.header.bank_id, "111");
/// assert_eq!(doc.header.account_type, "Unknown");
/// assert_eq!(doc.transactions[0].extra["FOO"], "bar");
/// ```
#[derive(Debug)]
pub struct StatementParser {
    state: ParserState,
    bank_id: Option<String>,
    account_id: Option<String>,
    account_type: Option<String>,
    /// Теги текущего (ещё не закрытого) блока.
    pending: BTreeMap<String, String>,
    transactions: Vec<ParsedTransaction>,
    /// Счётчик строк для логов (1-based).
    line_no: usize,
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser {
    /// Создаёт разборщик в состоянии «вне транзакции».
    pub fn new() -> Self {
        Self {
            state: ParserState::OutsideTransaction,
            bank_id: None,
            account_id: None,
            account_type: None,
            pending: BTreeMap::new(),
            transactions: Vec::new(),
            line_no: 0,
        }
    }

    /// Обрабатывает одну строку документа.
    pub fn feed_line(&mut self, raw: &str) {
        self.line_no += 1;
        let line = Line::classify(raw.trim());

        match (self.state, line) {
            (ParserState::OutsideTransaction, Line::Tag(name, value)) => {
                let Some(field) = HeaderField::from_tag(name) else {
                    return;
                };
                let slot = match field {
                    HeaderField::BankId => &mut self.bank_id,
                    HeaderField::AccountId => &mut self.account_id,
                    HeaderField::AccountType => &mut self.account_type,
                };
                *slot = Some(value.trim().to_string());
            }
            (state, Line::OpenTransaction) => {
                if state == ParserState::InsideTransaction {
                    warn!(
                        line = self.line_no,
                        tags = self.pending.len(),
                        "unterminated <STMTTRN> block discarded"
                    );
                }
                self.pending = BTreeMap::new();
                self.state = ParserState::InsideTransaction;
            }
            (ParserState::InsideTransaction, Line::CloseTransaction) => {
                let tags = std::mem::take(&mut self.pending);
                self.transactions.push(ParsedTransaction::from_tags(tags));
                self.state = ParserState::OutsideTransaction;
            }
            (ParserState::InsideTransaction, Line::Tag(name, value)) => {
                // Повтор тега в блоке: побеждает последнее значение.
                self.pending.insert(name.to_string(), value.to_string());
            }
            (_, Line::CloseTransaction | Line::Other) => {}
        }
    }

    /// Завершает разбор и возвращает документ.
    ///
    /// Незакрытый блок `<STMTTRN>` в конце ввода отбрасывается.
    pub fn finish(self) -> StatementDocument {
        if self.state == ParserState::InsideTransaction {
            warn!(tags = self.pending.len(), "statement ended inside <STMTTRN>; block dropped");
        }

        let defaults = AccountHeader::default();
        let header = AccountHeader {
            bank_id: self.bank_id.unwrap_or(defaults.bank_id),
            account_id: self.account_id.unwrap_or(defaults.account_id),
            account_type: self.account_type.unwrap_or(defaults.account_type),
        };
        if header.account_type == UNKNOWN {
            debug!("statement has no <ACCTTYPE>");
        }

        debug!(lines = self.line_no, transactions = self.transactions.len(), "parsed statement");
        StatementDocument::new(header, self.transactions)
    }
}

impl ParsedTransaction {
    /// Собирает транзакцию из тегов одного блока `<STMTTRN>`.
    ///
    /// Известные теги переносятся в именованные поля, остальные остаются в `extra`.
    pub fn from_tags(mut tags: BTreeMap<String, String>) -> Self {
        let posted = tags.remove("DTPOSTED").and_then(|text| parse_statement_date(text.trim()));
        let amount =
            tags.remove("TRNAMT").and_then(|text| parse_amount(&text).ok()).unwrap_or_default();

        Self {
            posted,
            kind: tags.remove("TRNTYPE"),
            amount,
            fit_id: tags.remove("FITID"),
            name: tags.remove("NAME"),
            memo: tags.remove("MEMO"),
            extra: tags,
        }
    }
}

/// Разбирает текст выписки целиком.
pub fn parse(text: &str) -> StatementDocument {
    let mut parser = StatementParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Читает выписку из потока и разбирает её.
///
/// Ошибкой может быть только чтение (I/O или невалидный UTF-8).
pub fn parse_reader<R: Read>(mut reader: R) -> StatementResult<StatementDocument> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse(&text))
}
