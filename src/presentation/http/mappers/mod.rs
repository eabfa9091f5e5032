use poem_openapi::payload::Json;
use tracing::error;

use crate::{
    application::usecases::notify_recipients::{DeliveryResult, NotifyReport, NotifyRequest},
    domain::errors::NotifyError,
    presentation::http::{
        requests::NotifyRequestDto,
        responses::{DeliveryResultDto, ErrorDto, INTERNAL_ERROR, NotifyResponse, NotifyResponseDto},
    },
};

const NO_RECIPIENTS_HINT: &str =
    "Ask user(s) to message the Page first to capture their PSID.";

pub fn map_notify_request(request: NotifyRequestDto) -> NotifyRequest {
    NotifyRequest {
        text: request.text,
        psid: request.psid,
        tag: request.tag,
    }
}

pub fn map_report(report: NotifyReport) -> NotifyResponseDto {
    let results: Vec<DeliveryResultDto> = report.results.into_iter().map(map_result).collect();
    NotifyResponseDto {
        ok: true,
        sent: results.len() as u32,
        results,
    }
}

fn map_result(result: DeliveryResult) -> DeliveryResultDto {
    DeliveryResultDto {
        psid: result.psid,
        result: result.result,
    }
}

/// Details of internal failures stay in the logs.
pub fn map_notify_error(err: NotifyError) -> NotifyResponse {
    match err {
        NotifyError::MissingText => NotifyResponse::BadRequest(Json(ErrorDto::new("text required"))),
        NotifyError::NoRecipients => NotifyResponse::BadRequest(Json(
            ErrorDto::new("no recipients").with_hint(NO_RECIPIENTS_HINT),
        )),
        NotifyError::Other(err) => {
            error!(error = ?err, "notify failed");
            NotifyResponse::InternalError(Json(ErrorDto::new(INTERNAL_ERROR)))
        }
    }
}
