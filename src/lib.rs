//! Blocking, Go-style hand-off channels for threads.
//!
//! Handoff provides a single channel primitive in three flavors selected by
//! capacity: a rendezvous channel (capacity 0) where a send completes only
//! together with a matching receive, a bounded channel where full buffers
//! exert backpressure on senders, and an unbounded channel limited only by
//! memory. Values are delivered in strict FIFO order, and blocked senders
//! and receivers are served in strict arrival order.
//!
//! Channels are closed explicitly. After [`Channel::close`] (or
//! [`Sender::close`]), sends fail with [`SendError::Closed`] while receives
//! keep draining buffered values, oldest first, until the channel is
//! exhausted and [`RecvError::Exhausted`] marks the end of the stream.
//!
//! Directional capability is enforced by the handle types: a [`Sender`]
//! has no receive methods and a [`Receiver`] has no close or send methods,
//! so an illegal operation is a compile error rather than a runtime check.

pub mod chan;
pub mod error;

pub use chan::{bounded, unbounded, Channel, Receiver, Sender};
pub use error::{
  CloseError, RecvError, RecvErrorTimeout, SendError, SendErrorTimeout, TryRecvError,
  TrySendError,
};
