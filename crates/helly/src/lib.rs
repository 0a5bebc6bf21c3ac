//! Helly Core Library
//!
//! Feedback orchestration and AI query delegation for a manager's
//! team feedback journal.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (TeamMember, Feedback, AskResponse)
//!   - `value_objects/`: Immutable value types (Hint, TimeWindow)
//!   - `services/`: Domain services (RosterEntityResolver)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: AI gateway, event sink, entity resolver
//!
//! - **Application Layer** (`application/`): Use cases
//!   - `FeedbackService`: resolve, store, publish, sync
//!   - `AskService`: delegate questions to the AI gateway
//!   - `TeamMemberService`: member registration and lookup
//!
//! - **Adapters** (`adapters/`): In-process port implementations
//!
//! # Usage
//!
//! ```rust,ignore
//! use helly::application::{FeedbackService, SubmitFeedback};
//! use helly::Hint;
//!
//! let outcome = feedback_service
//!     .submit(SubmitFeedback {
//!         content: "Max improved the API performance significantly.".into(),
//!         created_at: None,
//!         hint: Hint::MemberId(max_id),
//!     })
//!     .await?;
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AskResponse, Citation, DomainError, Feedback, FeedbackCreated, Hint, RosterEntityResolver,
    RosterMatch, TeamMember, TimeWindow,
};
pub use ports::{
    // Services
    AiGateway,
    CorpusItem,
    EntityResolver,
    EventSink,
    EventSinkError,
    // Repositories
    FeedbackFilter,
    FeedbackRepository,
    IngestRequest,
    QueryRequest,
    TeamMemberRepository,
};
