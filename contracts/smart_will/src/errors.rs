use soroban_sdk::contracterror;

/// Every condition a will operation can fail with.
///
/// Codes are part of the public interface: off-chain callers match on the
/// numeric value returned by the host, so existing variants must keep their
/// discriminant.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WillError {
    /// Creation arguments are malformed (non-positive amount or duration,
    /// `limit < transfer_amount`, deposit below `limit`).
    InvalidParameters = 1,
    /// Caller is not the party the operation requires.
    Unauthorized = 2,
    /// The owner proved liveness within the waiting period.
    OwnerStillActive = 3,
    /// The previous payout happened less than `transfer_frequency` ago.
    TransferFrequencyLimit = 4,
    /// The escrow cannot cover another payout (or has no surplus to reclaim).
    InsufficientBalance = 5,
    /// No escrow was ever created under this id.
    UnknownEscrow = 6,
    /// Another payout would push cumulative payouts over `limit`.
    LimitReached = 7,
    NotInitialized = 8,
    AlreadyInitialized = 9,
    ArithmeticOverflow = 10,
}
