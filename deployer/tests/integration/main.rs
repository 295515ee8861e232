//! End-to-end tests through the Cloud Run client against an in-process fake control plane
