//! The fixed, ordered set of operations a task can resolve to.
//!
//! Order is part of the contract: when an instruction contains more than
//! one phrase, the operation declared first wins.

use std::fmt;

/// Identity of a catalog entry. The engine dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationId {
    FormatMarkdown,
    CountWednesdays,
    SortContacts,
    RecentLogs,
    MarkdownIndex,
    ExtractEmailSender,
    ExtractCreditCard,
    SimilarComments,
    GoldTicketSales,
}

/// How an operation produces its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    LocalCompute,
    ShellDelegate,
    RemoteLlm,
    StoreQuery,
}

/// What must exist at an input path before the algorithm runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Dir,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::File => "file",
            InputKind::Dir => "directory",
        })
    }
}

/// A required input, relative to the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    pub path: &'static str,
    pub kind: InputKind,
}

/// One catalog entry.
#[derive(Debug, PartialEq, Eq)]
pub struct Operation {
    pub id: OperationId,
    pub name: &'static str,
    /// Lowercase substring matched against the instruction.
    pub phrase: &'static str,
    pub inputs: &'static [Input],
    pub outputs: &'static [&'static str],
    pub algorithm: Algorithm,
}

const fn file(path: &'static str) -> Input {
    Input {
        path,
        kind: InputKind::File,
    }
}

const fn dir(path: &'static str) -> Input {
    Input {
        path,
        kind: InputKind::Dir,
    }
}

pub static CATALOG: &[Operation] = &[
    Operation {
        id: OperationId::FormatMarkdown,
        name: "format markdown",
        phrase: "format markdown",
        inputs: &[file("format.md")],
        outputs: &["format.md"],
        algorithm: Algorithm::ShellDelegate,
    },
    Operation {
        id: OperationId::CountWednesdays,
        name: "count wednesdays",
        phrase: "count wednesdays",
        inputs: &[file("dates.txt")],
        outputs: &["dates-wednesdays.txt"],
        algorithm: Algorithm::LocalCompute,
    },
    Operation {
        id: OperationId::SortContacts,
        name: "sort contacts",
        phrase: "sort contacts",
        inputs: &[file("contacts.json")],
        outputs: &["contacts-sorted.json"],
        algorithm: Algorithm::LocalCompute,
    },
    Operation {
        id: OperationId::RecentLogs,
        name: "recent logs",
        phrase: "recent logs",
        inputs: &[dir("logs")],
        outputs: &["logs-recent.txt"],
        algorithm: Algorithm::LocalCompute,
    },
    Operation {
        id: OperationId::MarkdownIndex,
        name: "markdown index",
        phrase: "markdown index",
        inputs: &[dir("docs")],
        outputs: &["docs/index.json"],
        algorithm: Algorithm::LocalCompute,
    },
    Operation {
        id: OperationId::ExtractEmailSender,
        name: "extract email sender",
        phrase: "extract email",
        inputs: &[file("email.txt")],
        outputs: &["email-sender.txt"],
        algorithm: Algorithm::RemoteLlm,
    },
    Operation {
        id: OperationId::ExtractCreditCard,
        name: "extract credit card",
        phrase: "credit card",
        inputs: &[file("credit-card.png")],
        outputs: &["credit-card.txt"],
        algorithm: Algorithm::RemoteLlm,
    },
    Operation {
        id: OperationId::SimilarComments,
        name: "similar comments",
        phrase: "similar comments",
        inputs: &[file("comments.txt")],
        outputs: &["comments-similar.txt"],
        algorithm: Algorithm::RemoteLlm,
    },
    Operation {
        id: OperationId::GoldTicketSales,
        name: "gold ticket sales",
        phrase: "gold sales",
        inputs: &[file("ticket-sales.db")],
        outputs: &["ticket-sales-gold.txt"],
        algorithm: Algorithm::StoreQuery,
    },
];
