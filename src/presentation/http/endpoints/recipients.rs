use poem_openapi::{OpenApi, payload::Json};

use crate::{
    domain::value_objects::parse_recipients,
    presentation::http::{
        endpoints::root::EndpointsTags,
        mappers::count,
        requests::ParseRecipientsRequestDto,
        responses::ParseRecipientsResponseDto,
    },
};

pub struct RecipientsEndpoints;

#[OpenApi]
impl RecipientsEndpoints {
    /// Splits an uploaded list (`lines`) or a manual entry (`comma`) into ids.
    #[oai(path = "/recipients/parse", method = "post", tag = EndpointsTags::Recipients)]
    pub async fn parse_recipients(
        &self,
        request: Json<ParseRecipientsRequestDto>,
    ) -> Json<ParseRecipientsResponseDto> {
        let users = parse_recipients(request.format.into(), &request.content);
        Json(ParseRecipientsResponseDto {
            count: count(users.len()),
            users,
        })
    }
}
