use failure::Fail;

#[derive(Debug, Fail)]
pub enum ClientError {
    #[fail(display = "Error message: {}", message)]
    Message { message: String },
    #[fail(display = "Request failed: {}", message)]
    Transport { message: String },
    #[fail(display = "Malformed response body: {}", message)]
    MalformedBody {
        message: String,
        #[fail(cause)]
        cause: serde_json::Error,
    },
    #[fail(display = "Serialisation failed: {}", message)]
    FailedSerialisation {
        message: String,
        #[fail(cause)]
        cause: serde_json::Error,
    },
    #[fail(display = "Storage access failed: {}", message)]
    Storage { message: String },
    #[fail(display = "DOM access failed: {}", message)]
    Dom { message: String },
    #[fail(display = "Form field missing: {}", name)]
    MissingField { name: String },
}
