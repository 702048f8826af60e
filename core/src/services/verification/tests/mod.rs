//! Tests for the OTP verification session.
